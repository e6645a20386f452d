//! Source decoding: still images and animation frames to RGBA.
//!
//! Still images go through whatever formats the `image` crate is built
//! with. Animations are read from GIF containers with every frame fully
//! composited to the logical screen size; any other format decodes as a
//! single-frame animation.

use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, RgbaImage};
use tracing::debug;

use crate::{MatrixError, Result};

/// One decoded image or animation frame.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub pixels: RgbaImage,
    /// Display time of this frame in milliseconds (0 for still images).
    pub delay_ms: u32,
}

impl SourceImage {
    /// Wrap an already decoded RGBA image.
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            delay_ms: 0,
        }
    }

    /// Build from raw RGBA bytes (4 per pixel, row-major).
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let len = rgba.len();
        RgbaImage::from_raw(width, height, rgba)
            .map(Self::new)
            .ok_or_else(|| {
                MatrixError::InvalidInput(format!(
                    "{len} bytes of RGBA data do not fill a {width}x{height} image"
                ))
            })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Decode a still image.
///
/// Animated containers yield their first frame.
pub fn decode_still(bytes: &[u8]) -> Result<SourceImage> {
    if bytes.is_empty() {
        return Err(MatrixError::EmptyInput);
    }

    let pixels = image::load_from_memory(bytes)?.into_rgba8();
    debug!(
        width = pixels.width(),
        height = pixels.height(),
        "Decoded still image"
    );
    Ok(SourceImage::new(pixels))
}

/// Decode every frame of an animation in source order.
///
/// A malformed frame aborts the whole decode.
pub fn decode_animation(bytes: &[u8]) -> Result<Vec<SourceImage>> {
    if bytes.is_empty() {
        return Err(MatrixError::EmptyInput);
    }

    if image::guess_format(bytes)? != ImageFormat::Gif {
        debug!("Not a GIF container, decoding as a single frame");
        return decode_still(bytes).map(|frame| vec![frame]);
    }

    let decoder = GifDecoder::new(Cursor::new(bytes))?;
    let frames = decoder.into_frames().collect_frames()?;

    let frames: Vec<SourceImage> = frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            SourceImage {
                delay_ms: numer.checked_div(denom).unwrap_or(0),
                pixels: frame.into_buffer(),
            }
        })
        .collect();

    debug!(frame_count = frames.len(), "Decoded GIF animation");
    Ok(frames)
}

/// Whether `bytes` hold a GIF with more than one frame.
///
/// Anything that fails to parse is reported as not animated; the still
/// decoder then produces the real error.
pub fn is_animated(bytes: &[u8]) -> bool {
    if !matches!(image::guess_format(bytes), Ok(ImageFormat::Gif)) {
        return false;
    }
    let Ok(decoder) = GifDecoder::new(Cursor::new(bytes)) else {
        return false;
    };
    decoder
        .into_frames()
        .take(2)
        .filter(|frame| frame.is_ok())
        .count()
        > 1
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::codecs::gif::GifEncoder;
    use image::{Delay, DynamicImage, Frame, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encode solid-colour frames of the given size into a GIF.
    pub fn gif_bytes(width: u32, height: u32, colours: &[[u8; 4]]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut out);
            for colour in colours {
                let img = RgbaImage::from_pixel(width, height, Rgba(*colour));
                let frame = Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(100, 1));
                encoder.encode_frame(frame).unwrap();
            }
        }
        out
    }

    /// Encode a solid-colour PNG.
    pub fn png_bytes(width: u32, height: u32, colour: [u8; 4]) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(colour)));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }
}
