//! End-to-end conversion from encoded image bytes to frame buffers.

use image::RgbaImage;
use tracing::info;

use crate::animation::convert_frames;
use crate::buffer::FrameBuffer;
use crate::decode::{decode_animation, decode_still, is_animated};
use crate::encode::pixel_code;
use crate::options::RasterOptions;
use crate::raster::rasterize;
use crate::{MatrixError, Result};

/// Convert an already decoded image into a single-frame buffer.
pub fn convert_image(source: &RgbaImage, options: &RasterOptions) -> Result<FrameBuffer> {
    let raster = rasterize(source, options)?;
    let mut buffer = FrameBuffer::with_frames(1)?;
    let slot = buffer
        .frame_mut(0)
        .ok_or_else(|| MatrixError::Resource("single frame slot missing".into()))?;
    raster.write_codes(slot)?;
    Ok(buffer)
}

/// Decode and convert a still image. Never reports progress.
pub fn convert_still(bytes: &[u8], options: &RasterOptions) -> Result<FrameBuffer> {
    let source = decode_still(bytes)?;
    let buffer = convert_image(&source.pixels, options)?;
    info!(
        width = source.width(),
        height = source.height(),
        "Still image converted"
    );
    Ok(buffer)
}

/// Decode every frame of an animation and convert them in order.
pub fn convert_animation_bytes(
    bytes: &[u8],
    options: &RasterOptions,
    on_progress: Option<&mut dyn FnMut(f64)>,
) -> Result<FrameBuffer> {
    let frames = decode_animation(bytes)?;
    convert_frames(&frames, options, on_progress)
}

/// Convert `bytes` as an animation when they hold one, otherwise as a still.
pub fn convert_auto(
    bytes: &[u8],
    options: &RasterOptions,
    on_progress: Option<&mut dyn FnMut(f64)>,
) -> Result<FrameBuffer> {
    if is_animated(bytes) {
        convert_animation_bytes(bytes, options, on_progress)
    } else {
        convert_still(bytes, options)
    }
}

/// A single frame filled with one colour.
pub fn solid_frame(r: u8, g: u8, b: u8) -> Result<FrameBuffer> {
    let mut buffer = FrameBuffer::with_frames(1)?;
    buffer
        .frame_mut(0)
        .ok_or_else(|| MatrixError::Resource("single frame slot missing".into()))?
        .fill(pixel_code(r, g, b));
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::test_support::{gif_bytes, png_bytes};
    use crate::{MATRIX_BUFFER_SIZE, MATRIX_SIZE};

    #[test]
    fn test_convert_still_png() {
        let bytes = png_bytes(100, 50, [255, 255, 255, 255]);
        let buffer = convert_still(&bytes, &RasterOptions::default()).unwrap();
        assert_eq!(buffer.frame_count(), 1);

        let codes = buffer.as_codes();
        assert_eq!(codes[0], 0); // top border
        assert_eq!(codes[63 * 64 + 63], 0); // bottom border
        assert_eq!(codes[32 * 64 + 10], 0x00FF_FFFF);
        assert_eq!(buffer.to_bytes().len(), MATRIX_BUFFER_SIZE);
    }

    #[test]
    fn test_convert_still_black_is_all_zero() {
        let bytes = png_bytes(13, 77, [0, 0, 0, 255]);
        let buffer = convert_still(&bytes, &RasterOptions::default()).unwrap();
        assert!(buffer.to_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_convert_still_garbage_fails() {
        let err = convert_still(b"\x89PNG but not really", &RasterOptions::default()).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_convert_animation_bytes_reports_progress() {
        let bytes = gif_bytes(20, 10, &[[200, 0, 0, 255]; 4]);
        let mut seen = Vec::new();
        let mut record = |p: f64| seen.push(p);

        let buffer =
            convert_animation_bytes(&bytes, &RasterOptions::default(), Some(&mut record)).unwrap();

        assert_eq!(buffer.len(), 4 * MATRIX_SIZE);
        assert_eq!(seen, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_convert_auto_dispatch() {
        let mut calls = 0;
        let mut record = |_: f64| calls += 1;

        let still = convert_auto(
            &png_bytes(8, 8, [1, 1, 1, 255]),
            &RasterOptions::default(),
            Some(&mut record),
        )
        .unwrap();
        assert_eq!(still.frame_count(), 1);

        let anim = convert_auto(
            &gif_bytes(8, 8, &[[1, 1, 1, 255], [2, 2, 2, 255], [3, 3, 3, 255]]),
            &RasterOptions::default(),
            Some(&mut record),
        )
        .unwrap();
        assert_eq!(anim.frame_count(), 3);

        // Only the animation reports progress.
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_solid_frame() {
        let buffer = solid_frame(0x12, 0x34, 0x56).unwrap();
        assert_eq!(buffer.frame_count(), 1);
        assert_eq!(buffer.len(), MATRIX_SIZE);
        assert!(buffer.as_codes().iter().all(|&c| c == 0x0012_3456));
        assert_eq!(&buffer.to_bytes()[..4], &[0x56, 0x34, 0x12, 0x00]);
    }
}
