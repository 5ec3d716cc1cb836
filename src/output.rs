//! CLI output formatting.
//!
//! Each report has a `format_*` function (returns lines) for testability and
//! a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.
//!
//! ## Process
//!
//! ```text
//!  resized  12 The Left Hand of Darkness
//!  skipped  13 Ficciones
//!  missing  14 Untitled Draft
//!   failed  15 Broken Scan
//!           cover decode failed: ...
//!
//! Covers: 1 resized, 1 skipped, 1 missing, 1 failed (4 total)
//! ```
//!
//! ## Mosaic
//!
//! ```text
//! Grid: 12 x 9 (100x133 tiles)
//! Canvas: 1200x1197
//! Placed 105 covers, 2 unreadable
//! Wrote wallpaper.jpg
//! ```

use crate::mosaic::{GridPlan, MosaicStats};
use crate::process::{BatchStats, CoverEvent};
use crate::records::BookRecord;
use std::path::Path;

// ============================================================================
// Cover processing
// ============================================================================

/// Format one per-cover progress event.
///
/// One line per cover, outcome right-aligned so ids and titles line up;
/// failures get an indented detail line.
pub fn format_cover_event(event: &CoverEvent) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>8}  {} {}",
        event.outcome.label(),
        event.id,
        event.title
    )];
    if let Some(detail) = &event.detail {
        lines.push(format!("{:>8}  {}", "", detail));
    }
    lines
}

/// Print one cover event to stdout.
pub fn print_cover_event(event: &CoverEvent) {
    for line in format_cover_event(event) {
        println!("{}", line);
    }
}

/// Format the end-of-batch summary line.
pub fn format_batch_summary(stats: &BatchStats) -> String {
    format!("Covers: {}", stats)
}

/// Print the batch summary, preceded by a blank separator line.
pub fn print_batch_summary(stats: &BatchStats) {
    println!();
    println!("{}", format_batch_summary(stats));
}

// ============================================================================
// Mosaic
// ============================================================================

/// Format the mosaic report: grid shape, canvas size, tile counts, output.
pub fn format_mosaic_output(plan: &GridPlan, stats: &MosaicStats, output: &Path) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Grid: {} x {} ({}x{} tiles)",
            plan.cols, plan.rows, plan.tile_width, plan.tile_height
        ),
        format!("Canvas: {}x{}", plan.canvas_width(), plan.canvas_height()),
    ];
    if stats.failed > 0 {
        lines.push(format!(
            "Placed {} covers, {} unreadable",
            stats.placed, stats.failed
        ));
    } else {
        lines.push(format!("Placed {} covers", stats.placed));
    }
    lines.push(format!("Wrote {}", output.display()));
    lines
}

/// Print the mosaic report to stdout.
pub fn print_mosaic_output(plan: &GridPlan, stats: &MosaicStats, output: &Path) {
    for line in format_mosaic_output(plan, stats, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the library health report: record count, how many have a source
/// cover, how many carry a processed artifact reference.
pub fn format_check_output(records: &[BookRecord]) -> Vec<String> {
    let with_source = records
        .iter()
        .filter(|r| !r.source_cover_path.is_empty())
        .count();
    let processed = records
        .iter()
        .filter(|r| !r.output_cover_path.is_empty())
        .count();
    vec![
        format!("{} records", records.len()),
        format!(
            "{} with a source cover, {} without",
            with_source,
            records.len() - with_source
        ),
        format!("{} with a processed cover asset", processed),
    ]
}

/// Print the library health report to stdout.
pub fn print_check_output(records: &[BookRecord]) {
    for line in format_check_output(records) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Outcome;
    use std::path::PathBuf;

    // =========================================================================
    // Cover event formatting
    // =========================================================================

    #[test]
    fn cover_event_is_one_aligned_line() {
        let event = CoverEvent {
            id: 42,
            title: "The Hobbit".to_string(),
            outcome: Outcome::Success,
            detail: None,
        };
        assert_eq!(format_cover_event(&event), vec![" resized  42 The Hobbit"]);
    }

    #[test]
    fn failed_event_gets_a_detail_line() {
        let event = CoverEvent {
            id: 7,
            title: "Broken Scan".to_string(),
            outcome: Outcome::Failed,
            detail: Some("cover decode failed: bad marker".to_string()),
        };
        let lines = format_cover_event(&event);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  failed  7 Broken Scan");
        assert_eq!(lines[1], "          cover decode failed: bad marker");
    }

    #[test]
    fn batch_summary_wraps_stats_display() {
        let stats = BatchStats {
            resized: 2,
            skipped: 3,
            missing: 0,
            failed: 0,
        };
        assert_eq!(
            format_batch_summary(&stats),
            "Covers: 2 resized, 3 skipped (5 total)"
        );
    }

    // =========================================================================
    // Mosaic formatting
    // =========================================================================

    fn sample_plan() -> GridPlan {
        GridPlan {
            cols: 3,
            rows: 2,
            tile_width: 100,
            tile_height: 133,
            tiles: vec![PathBuf::from("covers/1.jpg")],
        }
    }

    #[test]
    fn mosaic_output_reports_grid_and_canvas() {
        let stats = MosaicStats {
            placed: 5,
            failed: 0,
        };
        let lines = format_mosaic_output(&sample_plan(), &stats, Path::new("wallpaper.jpg"));
        assert_eq!(lines[0], "Grid: 3 x 2 (100x133 tiles)");
        assert_eq!(lines[1], "Canvas: 300x266");
        assert_eq!(lines[2], "Placed 5 covers");
        assert_eq!(lines[3], "Wrote wallpaper.jpg");
    }

    #[test]
    fn mosaic_output_mentions_unreadable_tiles() {
        let stats = MosaicStats {
            placed: 4,
            failed: 1,
        };
        let lines = format_mosaic_output(&sample_plan(), &stats, Path::new("out.jpg"));
        assert_eq!(lines[2], "Placed 4 covers, 1 unreadable");
    }

    // =========================================================================
    // Check formatting
    // =========================================================================

    #[test]
    fn check_output_counts_sources_and_artifacts() {
        let mut processed = BookRecord::bare(1, "/lib/a/cover.jpg");
        processed.output_cover_path = "covers/1.jpg".to_string();
        let unprocessed = BookRecord::bare(2, "/lib/b/cover.jpg");
        let sourceless = BookRecord::bare(3, "");

        let lines = format_check_output(&[processed, unprocessed, sourceless]);
        assert_eq!(lines[0], "3 records");
        assert_eq!(lines[1], "2 with a source cover, 1 without");
        assert_eq!(lines[2], "1 with a processed cover asset");
    }

    #[test]
    fn check_output_on_empty_library() {
        let lines = format_check_output(&[]);
        assert_eq!(lines[0], "0 records");
    }
}
