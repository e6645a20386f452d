//! Animation frame driver.
//!
//! Rasterizes decoded frames one at a time, in source order, straight into
//! their slot of a single pre-allocated [`FrameBuffer`].

use tracing::{debug, info};

use crate::buffer::FrameBuffer;
use crate::decode::SourceImage;
use crate::options::RasterOptions;
use crate::raster::rasterize;
use crate::{MatrixError, Result};

/// Convert a decoded frame sequence into one contiguous buffer.
///
/// `on_progress` is called once per completed frame with the completed
/// fraction; the final call is exactly `1.0`. An empty sequence returns an
/// empty buffer without calling it. Any frame error aborts the conversion
/// and no partial buffer is returned.
pub fn convert_frames(
    frames: &[SourceImage],
    options: &RasterOptions,
    mut on_progress: Option<&mut dyn FnMut(f64)>,
) -> Result<FrameBuffer> {
    let frame_count = frames.len();
    if frame_count == 0 {
        debug!("No frames to convert");
        return Ok(FrameBuffer::empty());
    }

    let mut buffer = FrameBuffer::with_frames(frame_count)?;

    for (index, frame) in frames.iter().enumerate() {
        let raster = rasterize(&frame.pixels, options)?;
        let slot = buffer.frame_mut(index).ok_or_else(|| {
            MatrixError::Resource(format!("frame slot {index} missing from buffer"))
        })?;
        raster.write_codes(slot)?;

        debug!(index, frame_count, "Frame converted");

        if let Some(callback) = on_progress.as_deref_mut() {
            callback((index + 1) as f64 / frame_count as f64);
        }
    }

    info!(frame_count, "Animation converted");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::pixel_code;
    use crate::MATRIX_SIZE;
    use image::{Rgba, RgbaImage};

    fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> SourceImage {
        SourceImage::new(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    #[test]
    fn test_three_frames_fill_their_slots() {
        let frames = vec![
            solid_frame(64, 64, [255, 0, 0, 255]),
            solid_frame(32, 32, [0, 255, 0, 255]),
            solid_frame(200, 200, [0, 0, 255, 255]),
        ];
        let buffer = convert_frames(&frames, &RasterOptions::default(), None).unwrap();

        assert_eq!(buffer.len(), 3 * MATRIX_SIZE);
        assert_eq!(buffer.frame_count(), 3);

        let expected = [
            pixel_code(255, 0, 0),
            pixel_code(0, 255, 0),
            pixel_code(0, 0, 255),
        ];
        for (i, code) in expected.iter().enumerate() {
            let slice = &buffer.as_codes()[i * MATRIX_SIZE..(i + 1) * MATRIX_SIZE];
            assert!(slice.iter().all(|c| c == code), "frame {i}");
        }
    }

    #[test]
    fn test_progress_sequence_for_four_frames() {
        let frames: Vec<_> = (0..4).map(|_| solid_frame(10, 10, [5, 5, 5, 255])).collect();
        let mut seen = Vec::new();
        let mut record = |p: f64| seen.push(p);

        convert_frames(&frames, &RasterOptions::default(), Some(&mut record)).unwrap();

        assert_eq!(seen, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_progress_is_monotonic_and_ends_at_one() {
        let frames: Vec<_> = (0..7).map(|_| solid_frame(3, 5, [1, 1, 1, 255])).collect();
        let mut seen = Vec::new();
        let mut record = |p: f64| seen.push(p);

        convert_frames(&frames, &RasterOptions::default(), Some(&mut record)).unwrap();

        assert_eq!(seen.len(), 7);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.iter().filter(|&&p| p == 1.0).count(), 1);
        assert_eq!(seen.last(), Some(&1.0));
    }

    #[test]
    fn test_empty_sequence_skips_progress() {
        let mut calls = 0;
        let mut record = |_: f64| calls += 1;

        let buffer = convert_frames(&[], &RasterOptions::default(), Some(&mut record)).unwrap();

        assert!(buffer.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_bad_frame_aborts_conversion() {
        let frames = vec![
            solid_frame(8, 8, [1, 2, 3, 255]),
            SourceImage::new(RgbaImage::new(0, 8)),
            solid_frame(8, 8, [1, 2, 3, 255]),
        ];
        let mut seen = Vec::new();
        let mut record = |p: f64| seen.push(p);

        let err =
            convert_frames(&frames, &RasterOptions::default(), Some(&mut record)).unwrap_err();

        assert!(matches!(err, MatrixError::InvalidInput(_)));
        assert_eq!(seen, vec![1.0 / 3.0]);
    }

    #[test]
    fn test_mixed_frame_sizes_are_letterboxed_independently() {
        let frames = vec![
            solid_frame(100, 50, [255, 255, 255, 255]),
            solid_frame(50, 100, [255, 255, 255, 255]),
        ];
        let buffer = convert_frames(&frames, &RasterOptions::default(), None).unwrap();
        let white = pixel_code(255, 255, 255);

        let first = buffer.frame(0).unwrap();
        assert_eq!(first[0], 0); // (0, 0) in the top border
        assert_eq!(first[32 * 64 + 32], white);

        let second = buffer.frame(1).unwrap();
        assert_eq!(second[32 * 64], 0); // (0, 32) in the left border
        assert_eq!(second[32 * 64 + 32], white);
    }
}
