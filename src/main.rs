use clap::{Parser, Subcommand, ValueEnum};
use shelfpaper::mosaic::{self, OrderMode, PlanOptions};
use shelfpaper::normalize::Quality;
use shelfpaper::process::{self, PipelineOptions};
use shelfpaper::{config, output, records};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "shelfpaper")]
#[command(about = "Incremental book-cover pipeline and mosaic wallpaper generator")]
#[command(long_about = "\
Incremental book-cover pipeline and mosaic wallpaper generator

The library file is a JSON array of book records exported from your library
manager. Each record points at its original cover image; shelfpaper
normalizes those covers into a flat directory of small JPEGs, named by book
id, and writes the updated records (with content fingerprints and dominant
colors) back to the library file.

Re-runs are incremental: a cover whose content fingerprint still matches is
skipped, so only edited covers are re-encoded.

Layout:

  books.json           # Book records (read and rewritten by 'process')
  books.csv            # Optional tabular export (--csv)
  shelfpaper.toml      # Optional config (defaults shown in its docs)
  covers/
  ├── 12.jpg           # Normalized cover for book id 12
  └── 57.jpg
  wallpaper.jpg        # Mosaic built from covers/ by 'mosaic'

The mosaic command works purely off the covers directory, so it can run
without the library file.")]
#[command(version = version_string())]
struct Cli {
    /// Library records file
    #[arg(long, default_value = "books.json", global = true)]
    library: PathBuf,

    /// Directory for normalized cover assets
    #[arg(long, default_value = "covers", global = true)]
    covers_dir: PathBuf,

    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = "shelfpaper.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize covers for every record, incrementally
    Process {
        /// Reprocess all covers, ignoring fingerprints
        #[arg(long)]
        force: bool,
        /// Width cap for normalized covers (overrides config)
        #[arg(long)]
        max_width: Option<u32>,
        /// JPEG quality 1-100 (overrides config)
        #[arg(long)]
        quality: Option<u8>,
        /// Also write a CSV export of the catalog columns
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Compose the covers directory into one wallpaper image
    Mosaic {
        /// Width of one mosaic cell (overrides config)
        #[arg(long)]
        tile_width: Option<u32>,
        /// Tile ordering
        #[arg(long, value_enum, default_value_t = ModeArg::Flat)]
        mode: ModeArg,
        /// Output file
        #[arg(long, default_value = "wallpaper.jpg")]
        out: PathBuf,
    },
    /// Validate the library file and report cover coverage
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Deterministic scan order (numeric id, then name)
    Flat,
    /// Sorted by dominant-color hue
    Gradient,
}

impl From<ModeArg> for OrderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Flat => OrderMode::Flat,
            ModeArg::Gradient => OrderMode::Gradient,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Process {
            force,
            max_width,
            quality,
            csv,
        } => {
            let books = records::load_records(&cli.library)?;
            let opts = PipelineOptions {
                max_width: max_width.unwrap_or(config.covers.max_width),
                quality: Quality::new(quality.unwrap_or(config.covers.quality)),
                force,
            };

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::print_cover_event(&event);
                }
            });
            let result = process::process_batch(books, &cli.covers_dir, &opts, Some(&tx))?;
            drop(tx);
            printer.join().unwrap();

            records::save_records(&cli.library, &result.records)?;
            if let Some(csv_path) = csv {
                records::export_csv(&csv_path, &result.records)?;
                println!("Wrote {}", csv_path.display());
            }
            output::print_batch_summary(&result.stats);
        }
        Command::Mosaic {
            tile_width,
            mode,
            out,
        } => {
            let files = mosaic::scan_cover_dir(&cli.covers_dir)?;
            let plan_opts = PlanOptions {
                tile_width: tile_width.unwrap_or(config.mosaic.tile_width),
                screen_aspect: config.mosaic.screen_aspect_ratio(),
                mode: mode.into(),
            };
            let plan = mosaic::plan_grid(files, &cli.covers_dir, &plan_opts)?;
            let stats = mosaic::render_mosaic(&plan, &out, Quality::new(config.mosaic.quality))?;
            output::print_mosaic_output(&plan, &stats, &out);
        }
        Command::Check => {
            let books = records::load_records(&cli.library)?;
            output::print_check_output(&books);
        }
    }

    Ok(())
}
