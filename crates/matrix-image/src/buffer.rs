//! Owned buffer of packed frames.

use crate::encode;
use crate::{MATRIX_SIZE, MatrixError, Result};

/// Pixel codes for one or more frames, stored back to back in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameBuffer {
    codes: Vec<u32>,
}

impl FrameBuffer {
    /// An empty buffer with no frames.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Allocate a zeroed (all black) buffer for `frame_count` frames.
    ///
    /// The whole buffer is reserved up front; failure to do so is reported
    /// as [`MatrixError::Resource`] instead of aborting the process.
    pub fn with_frames(frame_count: usize) -> Result<Self> {
        let len = frame_count.checked_mul(MATRIX_SIZE).ok_or_else(|| {
            MatrixError::Resource(format!("{frame_count} frames overflow the buffer size"))
        })?;

        let mut codes = Vec::new();
        codes.try_reserve_exact(len).map_err(|e| {
            MatrixError::Resource(format!("cannot allocate {frame_count} frames: {e}"))
        })?;
        codes.resize(len, 0);
        Ok(Self { codes })
    }

    /// Wrap existing pixel codes. The length must be a whole number of frames.
    pub fn from_codes(codes: Vec<u32>) -> Result<Self> {
        if codes.len() % MATRIX_SIZE != 0 {
            return Err(MatrixError::InvalidInput(format!(
                "{} pixel codes is not a whole number of {MATRIX_SIZE}-pixel frames",
                codes.len()
            )));
        }
        Ok(Self { codes })
    }

    /// Parse a controller byte stream.
    pub fn from_byte_stream(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            codes: encode::from_byte_stream(bytes)?,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.codes.len() / MATRIX_SIZE
    }

    /// Total number of pixel codes across all frames.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Pixel codes of frame `index`, if it exists.
    pub fn frame(&self, index: usize) -> Option<&[u32]> {
        let start = index.checked_mul(MATRIX_SIZE)?;
        self.codes.get(start..start.checked_add(MATRIX_SIZE)?)
    }

    pub(crate) fn frame_mut(&mut self, index: usize) -> Option<&mut [u32]> {
        let start = index.checked_mul(MATRIX_SIZE)?;
        self.codes.get_mut(start..start.checked_add(MATRIX_SIZE)?)
    }

    /// Iterate over frames in order.
    pub fn frames(&self) -> impl Iterator<Item = &[u32]> {
        self.codes.chunks_exact(MATRIX_SIZE)
    }

    pub fn as_codes(&self) -> &[u32] {
        &self.codes
    }

    pub fn into_codes(self) -> Vec<u32> {
        self.codes
    }

    /// Serialize into the little-endian wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode::to_byte_stream(&self.codes)
    }
}
