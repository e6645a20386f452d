//! HTTP client for the LED matrix controller.
//!
//! Wraps the controller's small REST surface: system info, pattern
//! selection, brightness and raw frame uploads.

pub mod models;
mod request;

pub use models::{BrightnessRequest, PatternList, PatternRequest, SystemInfo};

use std::time::Duration;

use matrix_image::frame_count_of;
use tracing::info;
use url::Url;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Unified error type for the matrix-client crate.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Device error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid frame payload: {0}")]
    InvalidPayload(#[from] matrix_image::MatrixError),

    #[error("URL parse error: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for matrix-client operations.
pub type Result<T> = std::result::Result<T, DeviceError>;

/// Client for a single controller.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DeviceClient {
    /// Create a client for the controller at `base_url`, e.g. `http://esp-home.local`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Controller firmware version and core count.
    pub async fn system_info(&self) -> Result<SystemInfo> {
        let body = self.get("/api/system/info").await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Names of the patterns the controller can run.
    pub async fn list_patterns(&self) -> Result<Vec<String>> {
        let body = self.get("/api/patterns").await?;
        let list: PatternList = serde_json::from_str(&body)?;
        Ok(list.patterns)
    }

    /// Switch the controller to the named pattern.
    pub async fn set_pattern(&self, name: &str) -> Result<String> {
        self.post_json("/api/pattern", &PatternRequest { name: name.into() })
            .await
    }

    pub async fn set_brightness(&self, brightness: u8) -> Result<String> {
        self.post_json("/api/brightness", &BrightnessRequest { brightness })
            .await
    }

    /// Upload a byte stream of one or more frames for playback.
    ///
    /// The payload is checked against the controller's size rules before
    /// anything is sent.
    pub async fn upload_frames(&self, stream: &[u8]) -> Result<String> {
        let frame_count = frame_count_of(stream.len())?;
        let reply = self.post_bytes("/api/gif", stream.to_vec()).await?;
        info!(
            frame_count,
            bytes = stream.len(),
            device = %self.base_url,
            "Frames uploaded"
        );
        Ok(reply)
    }
}
