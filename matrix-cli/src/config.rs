//! Runtime configuration loaded from the environment (and `.env`).

use matrix_image::ResampleFilter;

use crate::args::Args;

pub const DEFAULT_DEVICE_URL: &str = "http://esp-home.local";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub device_url: String,
    pub timeout_secs: u64,
    pub filter: ResampleFilter,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            device_url: DEFAULT_DEVICE_URL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            filter: ResampleFilter::default(),
        }
    }
}

impl CliConfig {
    /// Load from `MATRIX_*` environment variables.
    ///
    /// Call [`load_dotenv`] first so values from `.env` are visible.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup. Unset or unparsable values keep their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let g = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let filter = match g("MATRIX_FILTER") {
            Some(v) => v.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring MATRIX_FILTER: {e}");
                defaults.filter
            }),
            None => defaults.filter,
        };

        Self {
            device_url: g("MATRIX_DEVICE_URL").unwrap_or(defaults.device_url),
            timeout_secs: parse_u64(g("MATRIX_TIMEOUT_SECS"), defaults.timeout_secs),
            filter,
        }
    }

    /// Apply command-line overrides.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(device) = &args.device {
            self.device_url = device.clone();
        }
        if let Some(timeout) = args.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(filter) = args.filter {
            self.filter = filter;
        }
        self
    }
}

/// Read `.env` from the working directory (or a parent) into the environment.
///
/// Returns the file that was loaded, if any.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    dotenvy::dotenv().ok()
}

fn parse_u64(s: Option<String>, default: u64) -> u64 {
    s.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
