//! The cover-asset cache controller.
//!
//! Walks every book record once, decides whether its cover needs
//! (re-)normalizing, and persists the decision back onto the record. This is
//! the incremental heart of the pipeline: on a library of thousands of books
//! a re-run after a handful of edits should touch only those covers.
//!
//! ## Per-record decision procedure
//!
//! 1. No source path, or the file is gone → `Missing`. The output path is
//!    cleared; the cached fingerprint and color are left alone (they
//!    describe the last thing that *was* processed, not this absence).
//! 2. Source exists but can't be fingerprinted → `Failed`. Distinct from
//!    `Missing`: a transient read error must not destroy a previously valid
//!    asset, so the output path keeps its current value.
//! 3. Unless forced: if the artifact file is on disk *and* the current
//!    fingerprint equals the recorded one (both present — an absent prior
//!    fingerprint never matches), skip. The output path is (re)set to the
//!    deterministic artifact path, idempotently.
//! 4. Otherwise normalize. Success writes the artifact (temp file + rename,
//!    so no partial file ever sits at the deterministic path), then records
//!    the new fingerprint, color, and output path. Failure clears the
//!    output path — a failed record must not point at a stale or
//!    half-written file.
//!
//! No per-record failure aborts the batch. The returned record list is a
//! complete replacement for the input: every record present, same order.

use crate::fingerprint::fingerprint;
use crate::normalize::{Quality, normalize};
use crate::records::{BookRecord, artifact_path, relative_artifact_path};
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Cover was normalized and the artifact written.
    Success,
    /// Source unchanged and artifact present — nothing to do.
    Skipped,
    /// No usable source file.
    Missing,
    /// Source present but unreadable, undecodable, or unwritable.
    Failed,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Success => "resized",
            Outcome::Skipped => "skipped",
            Outcome::Missing => "missing",
            Outcome::Failed => "failed",
        }
    }
}

/// Progress event emitted once per record, in input order.
#[derive(Debug, Clone)]
pub struct CoverEvent {
    pub id: i64,
    pub title: String,
    pub outcome: Outcome,
    /// Error detail for `Failed` outcomes.
    pub detail: Option<String>,
}

/// Aggregate outcome counts for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub resized: u32,
    pub skipped: u32,
    pub missing: u32,
    pub failed: u32,
}

impl BatchStats {
    pub fn total(&self) -> u32 {
        self.resized + self.skipped + self.missing + self.failed
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.resized += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Missing => self.missing += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} resized, {} skipped", self.resized, self.skipped)?;
        if self.missing > 0 {
            write!(f, ", {} missing", self.missing)?;
        }
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        write!(f, " ({} total)", self.total())
    }
}

/// Knobs for one batch run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub max_width: u32,
    pub quality: Quality,
    /// Reprocess every record with a valid source, ignoring fingerprints.
    pub force: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_width: 400,
            quality: Quality::default(),
            force: false,
        }
    }
}

/// Updated records plus aggregate counts.
#[derive(Debug)]
pub struct BatchResult {
    pub records: Vec<BookRecord>,
    pub stats: BatchStats,
}

/// Process every record once, sequentially, in input order.
///
/// `events`, when present, receives one [`CoverEvent`] per record as it is
/// decided — the caller typically drains it on a printer thread.
pub fn process_batch(
    mut records: Vec<BookRecord>,
    covers_dir: &Path,
    opts: &PipelineOptions,
    events: Option<&Sender<CoverEvent>>,
) -> Result<BatchResult, ProcessError> {
    std::fs::create_dir_all(covers_dir)?;

    let mut stats = BatchStats::default();
    for record in &mut records {
        let (outcome, detail) = process_record(record, covers_dir, opts);
        stats.record(outcome);
        if let Some(tx) = events {
            // A dropped receiver just means nobody is listening.
            let _ = tx.send(CoverEvent {
                id: record.id,
                title: record.title.clone(),
                outcome,
                detail,
            });
        }
    }

    Ok(BatchResult { records, stats })
}

fn process_record(
    record: &mut BookRecord,
    covers_dir: &Path,
    opts: &PipelineOptions,
) -> (Outcome, Option<String>) {
    let source = Path::new(&record.source_cover_path);
    if record.source_cover_path.is_empty() || !source.exists() {
        record.output_cover_path.clear();
        return (Outcome::Missing, None);
    }

    let current = match fingerprint(source) {
        Ok(digest) => digest,
        Err(e) => return (Outcome::Failed, Some(format!("fingerprint: {e}"))),
    };

    let artifact = artifact_path(covers_dir, record.id);
    if !opts.force
        && artifact.exists()
        && record.cached_fingerprint.as_deref() == Some(current.as_str())
    {
        record.output_cover_path = relative_artifact_path(covers_dir, record.id);
        return (Outcome::Skipped, None);
    }

    let source_bytes = match std::fs::read(source) {
        Ok(bytes) => bytes,
        Err(e) => {
            record.output_cover_path.clear();
            return (Outcome::Failed, Some(format!("read: {e}")));
        }
    };

    match normalize(&source_bytes, opts.max_width, opts.quality) {
        Ok(cover) => {
            if let Err(e) = write_artifact(&artifact, &cover.bytes) {
                record.output_cover_path.clear();
                return (Outcome::Failed, Some(format!("write: {e}")));
            }
            record.output_cover_path = relative_artifact_path(covers_dir, record.id);
            record.cached_fingerprint = Some(current);
            record.derived_color = Some(cover.color);
            (Outcome::Success, None)
        }
        Err(e) => {
            record.output_cover_path.clear();
            (Outcome::Failed, Some(e.to_string()))
        }
    }
}

/// Write the artifact atomically: temp file in the same directory, then
/// rename over the deterministic path.
fn write_artifact(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("jpg.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}
