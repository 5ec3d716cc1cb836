//! Mosaic wallpaper assembly.
//!
//! Two stages, one ephemeral data structure between them:
//! - **Plan** ([`plan`]): scan the covers directory, measure the average
//!   cover aspect ratio, and derive a near-screen-shaped grid plus the tile
//!   order (input order, or sorted by hue for a gradient effect).
//! - **Compose** ([`compose`]): paint each cover into its grid cell on a
//!   black canvas and encode one composite JPEG.

pub mod compose;
pub mod plan;

pub use compose::{MosaicStats, render_mosaic};
pub use plan::{GridPlan, OrderMode, PlanOptions, plan_grid, scan_cover_dir};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MosaicError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no cover images found in {0}")]
    EmptyInput(PathBuf),
    #[error("failed to encode mosaic: {0}")]
    Encode(String),
}
