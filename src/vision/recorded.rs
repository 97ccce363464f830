//! Recorded recognition backend
//!
//! Replays engine output captured earlier. Observations for `puzzle.png`
//! are read from a JSON sidecar such as `puzzle.observations.json` in the
//! same directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{Observation, TextRecognizer};
use crate::capture::frame::ScanImage;

/// Default sidecar suffix appended to the photo's file stem
pub const DEFAULT_SUFFIX: &str = ".observations.json";

/// Recognizer that loads observations from a sidecar file
#[derive(Debug, Clone)]
pub struct RecordedRecognizer {
    suffix: String,
}

impl Default for RecordedRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUFFIX)
    }
}

impl RecordedRecognizer {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Sidecar path for a photo
    pub fn sidecar_path(&self, photo: &Path) -> Option<PathBuf> {
        let stem = photo.file_stem()?.to_string_lossy();
        Some(photo.with_file_name(format!("{}{}", stem, self.suffix)))
    }
}

impl TextRecognizer for RecordedRecognizer {
    fn name(&self) -> &str {
        "recorded"
    }

    fn recognize(&self, image: &ScanImage) -> Result<Vec<Observation>> {
        let photo = image
            .source()
            .context("Photo has no source file to locate recorded observations")?;
        let sidecar = self
            .sidecar_path(photo)
            .with_context(|| format!("Cannot derive sidecar name for {:?}", photo))?;

        let content = std::fs::read_to_string(&sidecar)
            .with_context(|| format!("Failed to read recorded observations {:?}", sidecar))?;
        let observations: Vec<Observation> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid recorded observations in {:?}", sidecar))?;

        debug!("Loaded {} recorded observations from {:?}", observations.len(), sidecar);
        Ok(observations)
    }
}
