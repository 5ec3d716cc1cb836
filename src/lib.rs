//! # Shelfpaper
//!
//! An incremental cover-asset pipeline for personal book libraries, plus a
//! mosaic wallpaper generator built from the processed covers.
//!
//! # Architecture: Two Independent Pipelines
//!
//! ```text
//! 1. Process  books.json + original covers  →  covers/   (normalized assets,
//!                                              updated books.json, books.csv)
//! 2. Mosaic   covers/                       →  wallpaper.jpg
//! ```
//!
//! The process stage is incremental: each record carries a SHA-256
//! fingerprint of the source cover it was last normalized from, and a source
//! whose fingerprint still matches its existing artifact is skipped. On a
//! library of thousands of books a re-run after a handful of edits touches
//! only those covers.
//!
//! The mosaic stage is independent of the record store — it works off the
//! cover files on disk, so it composes whatever the process stage (or anyone
//! else) has put in the covers directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`records`] | The book record type, JSON load/save, CSV export, artifact naming |
//! | [`fingerprint`] | Chunked SHA-256 content digests for change detection |
//! | [`color`] | Dominant color extraction and hue computation |
//! | [`normalize`] | Decode → width-cap resize → JPEG re-encode of one cover |
//! | [`process`] | The incremental batch controller: skip/normalize decisions, stats |
//! | [`mosaic`] | Grid planning and composite rendering |
//! | [`config`] | Optional `shelfpaper.toml` with validated defaults |
//! | [`output`] | CLI output formatting — pure `format_*` plus `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Content Hashing Over Timestamps
//!
//! Skip decisions compare SHA-256 digests of the source bytes, not mtimes.
//! Library managers rewrite cover files freely (sync tools, metadata edits
//! that re-save identical pixels), so timestamps both over- and under-fire.
//! A digest is exactly as stale as the content itself — and because it is
//! recorded in the same JSON file as the catalog data, the cache travels
//! with the library.
//!
//! ## Pure-Rust Imaging
//!
//! All image work goes through the `image` crate: Lanczos3 resampling,
//! JPEG encode/decode. No ImageMagick, no system dependencies — the binary
//! is fully self-contained.
//!
//! ## Dominant Color via 1×1 Resize
//!
//! The dominant color of a cover is whatever Lanczos3 says a 1×1 version of
//! it looks like. That makes "average color" a property of the same
//! resampling filter used everywhere else rather than a hand-rolled loop,
//! and it is computed from the already-resized cover so it costs nearly
//! nothing.

pub mod color;
pub mod config;
pub mod fingerprint;
pub mod mosaic;
pub mod normalize;
pub mod output;
pub mod process;
pub mod records;

#[cfg(test)]
pub(crate) mod test_helpers;
