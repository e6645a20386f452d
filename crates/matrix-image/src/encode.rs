//! Pixel encoding for the controller wire format.
//!
//! Each pixel is packed as `0x00RRGGBB` and serialized as 4 little-endian
//! bytes. A stream holds one or more whole frames back to back.

use crate::{MATRIX_BUFFER_SIZE, MatrixError, Result};

/// Pack an RGB triple into a 32-bit pixel code (`0x00RRGGBB`).
#[inline]
pub fn pixel_code(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Split a pixel code back into its RGB channels. The top byte is ignored.
#[inline]
pub fn rgb_of(code: u32) -> [u8; 3] {
    let [_, r, g, b] = code.to_be_bytes();
    [r, g, b]
}

/// Serialize pixel codes into the little-endian byte stream.
///
/// The output is always exactly `4 * codes.len()` bytes.
pub fn to_byte_stream(codes: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(codes.len() * 4);
    for code in codes {
        bytes.extend_from_slice(&code.to_le_bytes());
    }
    bytes
}

/// Number of whole frames in a byte stream of `len` bytes.
///
/// The controller rejects anything shorter than one frame or not an exact
/// multiple of the frame size, so the same rules apply here.
pub fn frame_count_of(len: usize) -> Result<usize> {
    if len < MATRIX_BUFFER_SIZE {
        return Err(MatrixError::InvalidStream(format!(
            "stream of {len} bytes is shorter than one frame ({MATRIX_BUFFER_SIZE} bytes)"
        )));
    }
    if len % MATRIX_BUFFER_SIZE != 0 {
        return Err(MatrixError::InvalidStream(format!(
            "stream of {len} bytes is not a multiple of the frame size ({MATRIX_BUFFER_SIZE} bytes)"
        )));
    }
    Ok(len / MATRIX_BUFFER_SIZE)
}

/// Parse a byte stream back into pixel codes.
pub fn from_byte_stream(bytes: &[u8]) -> Result<Vec<u32>> {
    frame_count_of(bytes.len())?;
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
