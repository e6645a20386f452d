use serde::{Deserialize, Serialize};

/// Response of `GET /api/system/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub version: String,
    #[serde(default)]
    pub cores: u32,
}

/// Response of `GET /api/patterns`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternList {
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Body of `POST /api/pattern`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRequest {
    pub name: String,
}

/// Body of `POST /api/brightness`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BrightnessRequest {
    pub brightness: u8,
}
