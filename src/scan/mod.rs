//! Scan pipeline
//!
//! A scan turns one photo into a [`GridData`]: the recognizer detects text
//! regions, then the mapper places them on the grid. Scans run on a single
//! background worker; the result travels back as a complete value so the UI
//! never sees a half-built grid.

pub mod worker;

pub use worker::ScanWorker;

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::capture::frame::ScanImage;
use crate::grid::GridData;
use crate::vision::{recognized_text_summary, RecognitionMapper, TextRecognizer};

/// Errors raised by the scan pipeline
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Photo not found: {0:?}")]
    MissingImage(PathBuf),

    #[error("Photo has no pixel data: {0:?}")]
    EmptyImage(PathBuf),

    #[error("Failed to decode photo: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Scan {0} is still in progress")]
    Busy(Uuid),

    #[error("Scan worker has stopped")]
    WorkerStopped,

    #[error("Failed to start scan worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

/// One photo queued for recognition
#[derive(Debug)]
pub struct ScanRequest {
    pub id: Uuid,
    pub image: ScanImage,
    /// Mapper snapshot, so settings changed mid-session apply to the next scan
    pub mapper: RecognitionMapper,
}

/// Completed scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// Id of the request this answers
    pub id: Uuid,
    /// Entries placed on the grid
    pub grid: GridData,
    /// Best candidate of every observation, comma separated
    pub summary: String,
    /// Number of text regions the recognizer reported
    pub observation_count: usize,
    /// Time spent recognizing and mapping
    pub elapsed_ms: u64,
    /// Recognizer failure, if any. The grid is empty in that case.
    pub error: Option<String>,
}

impl ScanOutcome {
    /// Outcome of a scan that produced no grid
    pub fn failed(id: Uuid, error: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            id,
            grid: GridData::default(),
            summary: String::new(),
            observation_count: 0,
            elapsed_ms,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Run one request to completion
///
/// Recognizer failures are logged and produce an empty grid; they are not
/// retried.
pub fn process_request(recognizer: &dyn TextRecognizer, request: ScanRequest) -> ScanOutcome {
    let start = Instant::now();

    let outcome = match recognizer.recognize(&request.image) {
        Ok(observations) => {
            let entries = request.mapper.map(&observations);
            ScanOutcome {
                id: request.id,
                grid: GridData::scanned(entries),
                summary: recognized_text_summary(&observations),
                observation_count: observations.len(),
                elapsed_ms: start.elapsed().as_millis() as u64,
                error: None,
            }
        }
        Err(e) => {
            warn!("Recognition with {} failed: {:#}", recognizer.name(), e);
            ScanOutcome::failed(
                request.id,
                format!("{:#}", e),
                start.elapsed().as_millis() as u64,
            )
        }
    };

    info!(
        "Scan {} complete in {}ms: {} regions, {} entries",
        outcome.id,
        outcome.elapsed_ms,
        outcome.observation_count,
        outcome.grid.len()
    );

    outcome
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::vision::{BoundingBox, Observation};
    use anyhow::{anyhow, Result};

    /// Recognizer returning canned observations
    pub(crate) struct FixedRecognizer(pub Vec<Observation>);

    impl TextRecognizer for FixedRecognizer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn recognize(&self, _image: &ScanImage) -> Result<Vec<Observation>> {
            Ok(self.0.clone())
        }
    }

    /// Recognizer that always fails
    pub(crate) struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn name(&self) -> &str {
            "failing"
        }

        fn recognize(&self, _image: &ScanImage) -> Result<Vec<Observation>> {
            Err(anyhow!("engine unavailable"))
        }
    }

    /// Recognizer that panics mid-scan
    pub(crate) struct PanickingRecognizer;

    impl TextRecognizer for PanickingRecognizer {
        fn name(&self) -> &str {
            "panicking"
        }

        fn recognize(&self, _image: &ScanImage) -> Result<Vec<Observation>> {
            panic!("engine crashed")
        }
    }

    pub(crate) fn sample_observations() -> Vec<Observation> {
        vec![
            Observation::new(vec!["5".into()], BoundingBox::new(0.03, 0.93, 0.04, 0.04)),
            Observation::new(vec!["6".into()], BoundingBox::new(1.45, 0.45, 0.1, 0.1)),
            Observation::new(vec!["37".into()], BoundingBox::new(0.4, 0.4, 0.2, 0.2)),
        ]
    }

    fn request() -> ScanRequest {
        ScanRequest {
            id: Uuid::new_v4(),
            image: ScanImage::new(vec![0; 4], 1, 1),
            mapper: RecognitionMapper::default(),
        }
    }

    #[test]
    fn test_process_request_maps_observations() {
        let request = request();
        let id = request.id;
        let outcome = process_request(&FixedRecognizer(sample_observations()), request);

        assert!(outcome.is_ok());
        assert_eq!(outcome.id, id);
        assert_eq!(outcome.observation_count, 3);
        assert_eq!(outcome.summary, "5, 6, 37");
        // "6" lies outside the grid and is dropped
        assert_eq!(outcome.grid.initial().len(), 3);
        assert_eq!(outcome.grid.cell(0, 0).map(|e| e.value()), Some('5'));
        assert_eq!(outcome.grid.cell(3, 4).map(|e| e.value()), Some('3'));
        assert_eq!(outcome.grid.cell(4, 4).map(|e| e.value()), Some('7'));
        assert!(outcome.grid.solved().is_empty());
    }

    #[test]
    fn test_recognizer_failure_yields_empty_grid() {
        let outcome = process_request(&FailingRecognizer, request());

        assert!(!outcome.is_ok());
        assert!(outcome.grid.is_empty());
        assert_eq!(outcome.observation_count, 0);
        assert!(outcome.error.unwrap().contains("engine unavailable"));
    }

    #[test]
    fn test_outcome_json_report() {
        let outcome = process_request(&FixedRecognizer(sample_observations()), request());
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["summary"], "5, 6, 37");
        assert_eq!(json["observation_count"], 3);
        assert_eq!(json["grid"]["initial"][0]["digit"], 5);
        assert!(json["error"].is_null());
    }
}
