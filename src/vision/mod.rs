//! Vision/OCR Layer
//!
//! Models the text-recognition engine through the interface it exposes:
//! ranked text candidates per detected region plus a normalized bounding box.
//! Recognized regions are turned into grid entries by [`RecognitionMapper`].
//! Backends:
//! - Recorded engine output replayed from a JSON sidecar file

pub mod mapper;
pub mod recorded;

pub use mapper::{MapperConfig, RecognitionMapper, SplitMode};
pub use recorded::RecordedRecognizer;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::capture::frame::ScanImage;

/// Normalized bounding box of a detected region
///
/// All values are in [0, 1]. `y` is measured from the bottom of the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Center point (x, y)
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// One text region reported by the recognition engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Candidate strings, best first
    pub candidates: Vec<String>,
    /// Region bounds
    pub bounds: BoundingBox,
}

impl Observation {
    pub fn new(candidates: Vec<String>, bounds: BoundingBox) -> Self {
        Self { candidates, bounds }
    }

    /// Best candidate, if the engine produced any
    pub fn top(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }

    /// Up to `n` best candidates
    pub fn top_candidates(&self, n: usize) -> &[String] {
        &self.candidates[..n.min(self.candidates.len())]
    }
}

/// A text-recognition backend
///
/// Implementations run on the scan worker thread, one request at a time.
pub trait TextRecognizer: Send {
    /// Backend name for logs and the status bar
    fn name(&self) -> &str;

    /// Detect text regions in a photo
    fn recognize(&self, image: &ScanImage) -> Result<Vec<Observation>>;
}

/// Best candidate of every observation, comma separated
pub fn recognized_text_summary(observations: &[Observation]) -> String {
    observations
        .iter()
        .filter_map(|o| o.top())
        .collect::<Vec<_>>()
        .join(", ")
}
