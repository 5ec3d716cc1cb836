//! The book record store: the JSON file the external exporter writes and
//! this pipeline rewrites in place.
//!
//! The exporter (a SQL query against the library database) produces a flat
//! list of records carrying catalog metadata plus a `source_cover_path`
//! pointing at the original cover file. This module owns:
//!
//! - [`BookRecord`] — the structured record type. Explicit fields instead of
//!   a free-form map so the cache fields (`cached_fingerprint`,
//!   `derived_color`, `output_cover_path`) can't be misspelled.
//! - JSON load/save — pretty-printed, order-preserving. The saved file is a
//!   complete replacement for the input: every record present, same order.
//! - CSV export — catalog columns only, for spreadsheet consumption.
//! - Artifact naming — `<covers_dir>/<id>.jpg`, the one deterministic path
//!   per record id. Records store the run-relative form
//!   (`covers/42.jpg`) so downstream viewers can resolve it without
//!   knowing the absolute output location.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One catalog entry requiring a cover asset.
///
/// Catalog fields (`title`, `author`, `series`, `series_index`, `is_read`)
/// pass through the pipeline untouched. The cache fields are owned by
/// [`process_batch`](crate::process::process_batch):
///
/// - `cached_fingerprint`: SHA-256 of the source file at the time it was
///   last successfully normalized. Absent means "never processed".
/// - `derived_color`: dominant color of the normalized cover, set only on
///   successful normalization.
/// - `output_cover_path`: run-relative path of the normalized asset, empty
///   when no valid asset exists for this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub series: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_index: Option<f64>,
    #[serde(default)]
    pub is_read: i64,
    #[serde(default)]
    pub source_cover_path: String,
    #[serde(default)]
    pub output_cover_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_color: Option<[u8; 3]>,
}

impl BookRecord {
    /// A record with only identity and source path — catalog fields empty,
    /// cache fields unset. Used by tests and by exporters that carry no
    /// catalog metadata.
    pub fn bare(id: i64, source_cover_path: impl Into<String>) -> Self {
        Self {
            id,
            title: String::new(),
            author: String::new(),
            series: String::new(),
            series_index: None,
            is_read: 0,
            source_cover_path: source_cover_path.into(),
            output_cover_path: String::new(),
            cached_fingerprint: None,
            derived_color: None,
        }
    }
}

/// Absolute (or run-relative) filesystem path of the artifact for `id`.
pub fn artifact_path(covers_dir: &Path, id: i64) -> PathBuf {
    covers_dir.join(format!("{id}.jpg"))
}

/// The run-relative artifact path stored in the record, e.g. `covers/42.jpg`.
pub fn relative_artifact_path(covers_dir: &Path, id: i64) -> String {
    let dir = covers_dir
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if dir.is_empty() {
        format!("{id}.jpg")
    } else {
        format!("{dir}/{id}.jpg")
    }
}

/// Load records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<BookRecord>, RecordError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save records as pretty-printed JSON, replacing the file.
pub fn save_records(path: &Path, records: &[BookRecord]) -> Result<(), RecordError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Export the catalog columns as CSV.
///
/// Written by hand rather than via serde: the cache fields don't belong in
/// the spreadsheet view, and `derived_color` (a nested sequence) is not
/// representable in CSV anyway.
pub fn export_csv(path: &Path, records: &[BookRecord]) -> Result<(), RecordError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "id",
        "author",
        "title",
        "series",
        "series_index",
        "cover_path",
        "is_read",
    ])?;
    for record in records {
        writer.write_record([
            record.id.to_string(),
            record.author.clone(),
            record.title.clone(),
            record.series.clone(),
            record
                .series_index
                .map(|i| i.to_string())
                .unwrap_or_default(),
            record.output_cover_path.clone(),
            record.is_read.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
