//! Sudoku Scanner - place the digits of a photographed puzzle on a grid
//!
//! Text regions recognized in a photo are mapped onto a 9x9 grid and drawn
//! in a desktop window, or printed when running headless.

mod capture;
mod config;
mod dashboard;
mod grid;
mod render;
mod scan;
mod storage;
mod vision;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::scan::ScanWorker;
use crate::vision::{MapperConfig, RecognitionMapper, RecordedRecognizer};

/// Sudoku Scanner - read a puzzle from a photo
#[derive(Parser, Debug)]
#[command(name = "sudoku-scanner")]
#[command(about = "Recognize the digits of a photographed sudoku and lay them out on a grid")]
struct Args {
    /// Photo to scan
    photo: Option<PathBuf>,

    /// Configuration file (defaults to the per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scan the photo and print the grid instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Write the scan outcome as JSON (headless mode)
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG overrides the default filter
    let default_filter = if args.verbose {
        "sudoku_scanner=debug"
    } else {
        "sudoku_scanner=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("Sudoku Scanner starting...");

    let config_path = args.config.clone().or_else(|| match storage::default_config_path() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("No config directory available: {:#}", e);
            None
        }
    });
    let config = load_or_default_config(config_path.as_deref());

    let recognizer = RecordedRecognizer::new(config.general.observations_suffix.clone());
    let worker = ScanWorker::spawn(Box::new(recognizer))?;

    if args.headless {
        let photo = match args.photo {
            Some(photo) => photo,
            None => bail!("--headless needs a photo to scan"),
        };
        run_headless(&photo, args.json.as_deref(), &config, worker)?;
    } else {
        let photo = args.photo.or_else(|| config.general.last_photo.clone());
        if let Err(e) = dashboard::run_dashboard(config, config_path, worker, photo) {
            tracing::error!("Dashboard error: {}", e);
        }
    }

    info!("Sudoku Scanner shutdown complete");

    Ok(())
}

/// Load configuration from file or fall back to defaults
fn load_or_default_config(path: Option<&Path>) -> AppConfig {
    if let Some(path) = path {
        if path.exists() {
            match config::load_config(path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", path);
                    return config;
                }
                Err(e) => warn!("Ignoring config: {:#}", e),
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

/// Scan one photo on the worker and print the result
fn run_headless(
    photo: &Path,
    json: Option<&Path>,
    config: &AppConfig,
    mut worker: ScanWorker,
) -> Result<()> {
    let image = capture::load_photo(photo)?;
    let mapper = RecognitionMapper::new(MapperConfig::from(&config.recognition));

    worker.submit(image, mapper)?;
    let outcome = worker.wait()?;

    if let Some(path) = json {
        let content = serde_json::to_string_pretty(&outcome)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
        info!("Wrote scan report to {:?}", path);
    }

    if !outcome.is_ok() {
        bail!("Scan failed: {}", outcome.error.as_deref().unwrap_or_default());
    }

    println!("Recognized: {}", outcome.summary);
    println!();
    print!("{}", outcome.grid.to_text_grid());

    Ok(())
}
