//! Shared test utilities for the shelfpaper test suite.
//!
//! Covers in tests are synthetic solid-color JPEGs built in memory, so no
//! binary fixtures live in the repo and every test controls its images'
//! exact dimensions and colors.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Encode a solid-color JPEG of the given size into a byte buffer.
pub fn jpeg_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), 95);
    DynamicImage::ImageRgb8(img)
        .write_with_encoder(encoder)
        .unwrap();
    bytes
}

/// Write a solid-color JPEG to `path`, creating parent directories.
pub fn write_jpeg(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, jpeg_bytes(width, height, color)).unwrap();
}
