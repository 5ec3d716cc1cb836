//! Painting the planned grid into one composite JPEG.
//!
//! Each tile is scaled to *cover* its cell and center-cropped, so every
//! cell is filled edge to edge regardless of the cover's own aspect ratio.
//! A tile that fails to open leaves its cell black and is counted; it never
//! aborts the render.

use crate::mosaic::{GridPlan, MosaicError};
use crate::normalize::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage, imageops};
use std::io::Cursor;
use std::path::Path;

/// Per-render tile counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MosaicStats {
    pub placed: u32,
    pub failed: u32,
}

/// Render `plan` to a JPEG at `output`.
///
/// Tiles are placed row-major: tile `i` at column `i % cols`, row
/// `i / cols`. The canvas starts black; unopenable tiles stay that way.
pub fn render_mosaic(
    plan: &GridPlan,
    output: &Path,
    quality: Quality,
) -> Result<MosaicStats, MosaicError> {
    // RgbImage::new zero-fills, which is the black background we want.
    let mut canvas = RgbImage::new(plan.canvas_width(), plan.canvas_height());
    let mut stats = MosaicStats::default();

    for (i, tile) in plan.tiles.iter().enumerate() {
        let col = i as u32 % plan.cols;
        let row = i as u32 / plan.cols;
        match image::open(tile) {
            Ok(img) => {
                let fitted = img
                    .resize_to_fill(plan.tile_width, plan.tile_height, FilterType::Lanczos3)
                    .to_rgb8();
                imageops::replace(
                    &mut canvas,
                    &fitted,
                    i64::from(col * plan.tile_width),
                    i64::from(row * plan.tile_height),
                );
                stats.placed += 1;
            }
            Err(_) => stats.failed += 1,
        }
    }

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality.value());
    DynamicImage::ImageRgb8(canvas)
        .write_with_encoder(encoder)
        .map_err(|e| MosaicError::Encode(e.to_string()))?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, &bytes)?;

    Ok(stats)
}
