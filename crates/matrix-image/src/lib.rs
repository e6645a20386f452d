//! Image conversion for the 64x64 LED matrix controller.
//!
//! Scales still images and animation frames to fit the panel, letterboxes
//! them on black, and packs every pixel into the `0x00RRGGBB` little-endian
//! wire format the controller consumes.

pub mod animation;
pub mod buffer;
pub mod decode;
pub mod encode;
pub mod options;
pub mod pipeline;
pub mod raster;

// Re-exports for convenience
pub use animation::convert_frames;
pub use buffer::FrameBuffer;
pub use decode::{SourceImage, decode_animation, decode_still, is_animated};
pub use encode::{frame_count_of, from_byte_stream, pixel_code, rgb_of, to_byte_stream};
pub use options::{RasterOptions, ResampleFilter};
pub use pipeline::{
    convert_animation_bytes, convert_auto, convert_image, convert_still, solid_frame,
};
pub use raster::{FitGeometry, RasterFrame, rasterize};

/// Panel width in pixels.
pub const MATRIX_WIDTH: u32 = 64;

/// Panel height in pixels.
pub const MATRIX_HEIGHT: u32 = 64;

/// Pixels in one frame.
pub const MATRIX_SIZE: usize = (MATRIX_WIDTH * MATRIX_HEIGHT) as usize;

/// Bytes in one serialized frame (4 bytes per pixel).
pub const MATRIX_BUFFER_SIZE: usize = MATRIX_SIZE * std::mem::size_of::<u32>();

/// Errors that can occur while converting images for the matrix.
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image data is empty")]
    EmptyInput,

    #[error("Failed to acquire resources: {0}")]
    Resource(String),

    #[error("Invalid byte stream: {0}")]
    InvalidStream(String),
}

impl MatrixError {
    /// Whether this error came from decoding the source bytes.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::EmptyInput)
    }
}

/// Result type alias for matrix-image operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
