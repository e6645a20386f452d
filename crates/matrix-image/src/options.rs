//! Rasterizer configuration options.
//!
//! Only smooth resampling filters are offered; nearest-neighbour scaling
//! produces visibly blocky output on the panel.

use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;

/// Interpolation filter used when scaling a source image onto the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Bilinear interpolation.
    #[default]
    Triangle,
    /// Cubic interpolation (Catmull-Rom).
    CatmullRom,
    Gaussian,
    /// Lanczos with window 3, sharpest of the set.
    Lanczos3,
}

impl ResampleFilter {
    /// Name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::CatmullRom => "catmullrom",
            Self::Gaussian => "gaussian",
            Self::Lanczos3 => "lanczos3",
        }
    }

    pub(crate) fn filter_type(self) -> FilterType {
        match self {
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResampleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangle" | "bilinear" | "linear" => Ok(Self::Triangle),
            "catmullrom" | "catmull-rom" | "cubic" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(format!(
                "unknown resample filter '{other}' \
                 (expected triangle, catmullrom, gaussian or lanczos3)"
            )),
        }
    }
}

/// Configuration options for rasterizing frames.
#[derive(Debug, Clone, Default)]
pub struct RasterOptions {
    /// Filter used to scale the source into the panel.
    pub filter: ResampleFilter,
}

impl RasterOptions {
    /// Create options with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the resampling filter.
    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }
}
