//! Cover normalization: decode, width-cap, re-encode.
//!
//! A normalized cover is the reusable asset every downstream consumer works
//! from — the catalog viewer, the mosaic, the CSV export. Normalization is a
//! pure function from (source bytes, max width, quality) to (JPEG bytes,
//! dominant color): no filesystem access, so it is trivially testable and
//! the cache controller decides where the bytes land.
//!
//! Pipeline per cover:
//!
//! 1. Decode (any format the compiled-in decoders accept).
//! 2. Convert to three-channel RGB — alpha and palette distinctions are
//!    discarded; JPEG encoding and color averaging both assume RGB.
//! 3. If wider than `max_width`, scale down proportionally (Lanczos3).
//!    Never upscale.
//! 4. Encode as JPEG at the requested quality.
//! 5. Extract the dominant color from the *resized* image. Computing after
//!    the downscale is part of the contract: tests reproduce the color from
//!    the artifact alone.

use crate::color::dominant_color;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("failed to decode source image: {0}")]
    Decode(String),
    #[error("failed to encode cover: {0}")]
    Encode(String),
}

/// Lossy encoding quality (1–100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Result of a successful normalization.
#[derive(Debug, Clone)]
pub struct NormalizedCover {
    /// JPEG-encoded output.
    pub bytes: Vec<u8>,
    /// Dominant color of the resized image.
    pub color: [u8; 3],
    pub width: u32,
    pub height: u32,
}

/// Normalize one cover image. See the module docs for the exact pipeline.
pub fn normalize(
    source: &[u8],
    max_width: u32,
    quality: Quality,
) -> Result<NormalizedCover, NormalizeError> {
    let decoded =
        image::load_from_memory(source).map_err(|e| NormalizeError::Decode(e.to_string()))?;
    let mut rgb = decoded.to_rgb8();

    if rgb.width() > max_width {
        let height = scaled_height(rgb.width(), rgb.height(), max_width);
        rgb = image::imageops::resize(&rgb, max_width, height, FilterType::Lanczos3);
    }

    let color = dominant_color(&rgb);
    let (width, height) = rgb.dimensions();

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality.value());
    DynamicImage::ImageRgb8(rgb)
        .write_with_encoder(encoder)
        .map_err(|e| NormalizeError::Encode(e.to_string()))?;

    Ok(NormalizedCover {
        bytes,
        color,
        width,
        height,
    })
}

/// Proportional height for a width-capped resize, rounded, at least 1.
fn scaled_height(width: u32, height: u32, max_width: u32) -> u32 {
    let scaled = (height as f64 * max_width as f64 / width as f64).round() as u32;
    scaled.max(1)
}
