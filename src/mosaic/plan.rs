//! Grid planning: from a directory of cover files to a concrete layout.
//!
//! The grid shape is driven by the *measured* average aspect ratio of the
//! covers, not a hardcoded book-ish constant: a library of wide art books
//! and one of tall paperbacks get different tile shapes, and the
//! column/row split is compensated so the overall canvas still lands near
//! the requested screen aspect.

use crate::color::{dominant_color, hue_of};
use crate::mosaic::MosaicError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Used for the tile shape when covers exist but none can be opened.
/// Typical book-cover width/height ratio.
const FALLBACK_RATIO: f64 = 0.75;

/// How tiles are ordered within the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderMode {
    /// Deterministic scan order (numeric id, then name).
    #[default]
    Flat,
    /// Ascending hue of each cover's dominant color.
    Gradient,
}

#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    pub tile_width: u32,
    /// Desired overall canvas shape, e.g. 16/9.
    pub screen_aspect: f64,
    pub mode: OrderMode,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            tile_width: 100,
            screen_aspect: 16.0 / 9.0,
            mode: OrderMode::Flat,
        }
    }
}

/// A computed layout: grid shape, tile shape, and the tiles in placement
/// order. Row-major — tile `i` goes to column `i % cols`, row `i / cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    pub cols: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tiles: Vec<PathBuf>,
}

impl GridPlan {
    pub fn canvas_width(&self) -> u32 {
        self.cols * self.tile_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.rows * self.tile_height
    }
}

/// List the JPEG cover files directly inside `dir`, deterministically
/// ordered: by numeric file stem where the stem parses as an integer
/// (so `2.jpg` before `10.jpg`), then the rest by name.
pub fn scan_cover_dir(dir: &Path) -> Result<Vec<PathBuf>, MosaicError> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| MosaicError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let is_jpeg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"));
        if is_jpeg {
            files.push(path);
        }
    }
    files.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    Ok(files)
}

fn sort_key(path: &Path) -> (bool, i64, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    // Numeric stems first, in numeric order; everything else after, by name.
    match stem.parse::<i64>() {
        Ok(n) => (false, n, stem),
        Err(_) => (true, 0, stem),
    }
}

/// Compute the grid layout for `files`.
///
/// Fails with [`MosaicError::EmptyInput`] only when `files` is empty. Files
/// that exist but cannot be opened are kept as tiles (the compositor leaves
/// their cells black); they just contribute nothing to the average ratio,
/// and if *no* file is readable the tile shape falls back to
/// [`FALLBACK_RATIO`].
pub fn plan_grid(
    files: Vec<PathBuf>,
    source_dir: &Path,
    opts: &PlanOptions,
) -> Result<GridPlan, MosaicError> {
    if files.is_empty() {
        return Err(MosaicError::EmptyInput(source_dir.to_path_buf()));
    }

    let ratios: Vec<f64> = files
        .iter()
        .filter_map(|path| image::image_dimensions(path).ok())
        .filter(|&(_, h)| h > 0)
        .map(|(w, h)| f64::from(w) / f64::from(h))
        .collect();
    let avg_ratio = if ratios.is_empty() {
        FALLBACK_RATIO
    } else {
        ratios.iter().sum::<f64>() / ratios.len() as f64
    };

    let tile_height = ((f64::from(opts.tile_width) / avg_ratio).round() as u32).max(1);

    // Non-square tiles need a different col/row split than the screen
    // aspect itself to reach a screen-shaped canvas.
    let n = files.len() as u32;
    let target_grid_ratio = opts.screen_aspect / avg_ratio;
    let mut cols = ((f64::from(n) * target_grid_ratio).sqrt().ceil() as u32).max(1);
    let rows = n.div_ceil(cols);
    // Guard against rounding shortfalls: never fewer slots than tiles.
    while cols * rows < n {
        cols += 1;
    }

    let tiles = match opts.mode {
        OrderMode::Flat => files,
        OrderMode::Gradient => order_by_hue(files),
    };

    Ok(GridPlan {
        cols,
        rows,
        tile_width: opts.tile_width,
        tile_height,
        tiles,
    })
}

/// Stable sort by the hue of each cover's dominant color, ascending.
/// Unreadable covers get hue 0.0 and stay in the set.
fn order_by_hue(files: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut keyed: Vec<(f64, PathBuf)> = files
        .into_iter()
        .map(|path| {
            let hue = image::open(&path)
                .map(|img| hue_of(dominant_color(&img.to_rgb8())))
                .unwrap_or(0.0);
            (hue, path)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, path)| path).collect()
}
