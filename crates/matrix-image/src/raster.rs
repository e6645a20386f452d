//! Frame rasterizer: scale-to-fit, centre and letterbox onto the panel.
//!
//! The source is scaled with its aspect ratio preserved so that it fits
//! entirely inside the 64x64 panel, then drawn centred on a black
//! background. Sizes and offsets are truncated, never rounded.

use image::{Rgb, RgbImage, Rgba, RgbaImage, imageops};
use tracing::debug;

use crate::encode::pixel_code;
use crate::options::RasterOptions;
use crate::{MATRIX_HEIGHT, MATRIX_SIZE, MATRIX_WIDTH, MatrixError, Result};

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Placement of a scaled source image inside the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitGeometry {
    /// Factor applied to both source dimensions.
    pub scale: f64,
    /// Scaled width, at most [`MATRIX_WIDTH`].
    pub width: u32,
    /// Scaled height, at most [`MATRIX_HEIGHT`].
    pub height: u32,
    pub left: u32,
    pub top: u32,
}

impl FitGeometry {
    /// Compute the fit for a source of the given size.
    ///
    /// The side that is longer relative to the panel becomes exactly the
    /// panel size; the other side is truncated from `side * scale`. The
    /// whole source always fits: a wide image is letterboxed, never cropped.
    pub fn for_source(source_width: u32, source_height: u32) -> Result<Self> {
        if source_width == 0 || source_height == 0 {
            return Err(MatrixError::InvalidInput(format!(
                "source image has zero dimension ({source_width}x{source_height})"
            )));
        }

        let (tw, th) = (u64::from(MATRIX_WIDTH), u64::from(MATRIX_HEIGHT));
        let (sw, sh) = (u64::from(source_width), u64::from(source_height));

        // sw/sh > tw/th, cross-multiplied to stay in integers
        let (width, height, scale) = if sw * th > sh * tw {
            (tw, sh * tw / sw, tw as f64 / sw as f64)
        } else {
            (sw * th / sh, th, th as f64 / sh as f64)
        };

        // Both values are bounded by the panel size.
        let width = width as u32;
        let height = height as u32;

        Ok(Self {
            scale,
            width,
            height,
            left: (MATRIX_WIDTH - width) / 2,
            top: (MATRIX_HEIGHT - height) / 2,
        })
    }

    /// Whether the scaled image covers the whole panel.
    pub fn is_full_bleed(&self) -> bool {
        self.width == MATRIX_WIDTH && self.height == MATRIX_HEIGHT
    }
}

/// A canonical 64x64 RGB frame ready for encoding.
#[derive(Debug, Clone)]
pub struct RasterFrame {
    pixels: RgbImage,
    geometry: FitGeometry,
}

impl RasterFrame {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Placement the source was drawn with.
    pub fn geometry(&self) -> FitGeometry {
        self.geometry
    }

    /// RGB triple at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the panel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Packed pixel codes in row-major order.
    pub fn pixel_codes(&self) -> impl Iterator<Item = u32> + '_ {
        self.pixels
            .pixels()
            .map(|&Rgb([r, g, b])| pixel_code(r, g, b))
    }

    /// Write packed pixel codes into `out`, which must hold exactly one frame.
    pub fn write_codes(&self, out: &mut [u32]) -> Result<()> {
        if out.len() != MATRIX_SIZE {
            return Err(MatrixError::InvalidInput(format!(
                "frame slot holds {} pixels, expected {MATRIX_SIZE}",
                out.len()
            )));
        }
        for (slot, code) in out.iter_mut().zip(self.pixel_codes()) {
            *slot = code;
        }
        Ok(())
    }
}

/// Rasterize a decoded RGBA image onto the panel.
///
/// Transparent source pixels composite over the black background before
/// scaling, so invisible colour never bleeds into visible edges; the alpha
/// channel does not survive into the output.
pub fn rasterize(source: &RgbaImage, options: &RasterOptions) -> Result<RasterFrame> {
    let (source_width, source_height) = source.dimensions();
    let geometry = FitGeometry::for_source(source_width, source_height)?;

    debug!(
        source_width,
        source_height,
        scale = geometry.scale,
        new_width = geometry.width,
        new_height = geometry.height,
        left = geometry.left,
        top = geometry.top,
        filter = %options.filter,
        "Rasterizing frame"
    );

    let mut canvas = RgbImage::from_pixel(MATRIX_WIDTH, MATRIX_HEIGHT, BACKGROUND);

    // A source far thinner than the panel can truncate to zero rows or columns.
    if geometry.width > 0 && geometry.height > 0 {
        let flattened = composite_on_black(source);
        let scaled = imageops::resize(
            &flattened,
            geometry.width,
            geometry.height,
            options.filter.filter_type(),
        );
        imageops::replace(
            &mut canvas,
            &scaled,
            i64::from(geometry.left),
            i64::from(geometry.top),
        );
    } else {
        debug!(source_width, source_height, "Scaled size is empty, frame stays black");
    }

    Ok(RasterFrame {
        pixels: canvas,
        geometry,
    })
}

/// Flatten `source` onto black at its own size.
///
/// Opaque pixels are copied; translucent ones are scaled by their alpha,
/// which is source-over compositing against black.
fn composite_on_black(source: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(source.width(), source.height(), |x, y| {
        let Rgba([r, g, b, a]) = *source.get_pixel(x, y);
        match a {
            255 => Rgb([r, g, b]),
            0 => BACKGROUND,
            _ => Rgb([
                premultiply(r, a),
                premultiply(g, a),
                premultiply(b, a),
            ]),
        }
    })
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    // Rounded; the result never exceeds `channel`.
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}
