//! Background scan worker
//!
//! Owns the recognizer on a dedicated thread. At most one request is in
//! flight; outcomes are collected by whoever owns the worker (the dashboard
//! frame loop or the headless runner), which is the only place the current
//! grid is replaced.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread::JoinHandle;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{process_request, ScanError, ScanOutcome, ScanRequest};
use crate::capture::frame::ScanImage;
use crate::vision::{RecognitionMapper, TextRecognizer};

/// Single-threaded recognition worker
pub struct ScanWorker {
    /// Channel to the worker thread; dropped on shutdown
    requests: Option<Sender<ScanRequest>>,
    /// Completed scans
    outcomes: Receiver<ScanOutcome>,
    /// Request awaiting its outcome
    in_flight: Option<Uuid>,
    /// Handle to worker thread
    handle: Option<JoinHandle<()>>,
    recognizer_name: String,
}

impl ScanWorker {
    /// Start the worker thread
    pub fn spawn(recognizer: Box<dyn TextRecognizer>) -> Result<Self, ScanError> {
        let (requests, request_rx) = unbounded::<ScanRequest>();
        let (outcome_tx, outcomes) = unbounded();
        let recognizer_name = recognizer.name().to_string();

        let handle = std::thread::Builder::new()
            .name("scan-worker".into())
            .spawn(move || {
                info!("Scan worker starting with {} recognizer", recognizer.name());
                for request in request_rx.iter() {
                    let id = request.id;
                    let start = Instant::now();
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                        process_request(recognizer.as_ref(), request)
                    }))
                    .unwrap_or_else(|payload| {
                        let message = panic_message(payload.as_ref());
                        error!("Recognizer {} panicked: {}", recognizer.name(), message);
                        ScanOutcome::failed(
                            id,
                            format!("Recognizer panicked: {}", message),
                            start.elapsed().as_millis() as u64,
                        )
                    });
                    if outcome_tx.send(outcome).is_err() {
                        break;
                    }
                }
                info!("Scan worker exiting...");
            })
            .map_err(ScanError::WorkerSpawn)?;

        Ok(Self {
            requests: Some(requests),
            outcomes,
            in_flight: None,
            handle: Some(handle),
            recognizer_name,
        })
    }

    /// Name of the recognizer the worker runs
    pub fn recognizer_name(&self) -> &str {
        &self.recognizer_name
    }

    /// Queue a photo. Rejected while another scan is in flight.
    pub fn submit(&mut self, image: ScanImage, mapper: RecognitionMapper) -> Result<Uuid, ScanError> {
        if let Some(id) = self.in_flight {
            return Err(ScanError::Busy(id));
        }

        let sender = self.requests.as_ref().ok_or(ScanError::WorkerStopped)?;
        let id = Uuid::new_v4();
        sender
            .send(ScanRequest { id, image, mapper })
            .map_err(|_| ScanError::WorkerStopped)?;

        debug!("Submitted scan {}", id);
        self.in_flight = Some(id);
        Ok(id)
    }

    /// Whether a scan is in flight
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Collect the in-flight outcome without blocking
    ///
    /// If the worker thread has gone away, the in-flight scan is reported as
    /// failed so the caller is not left waiting on it.
    pub fn try_complete(&mut self) -> Option<ScanOutcome> {
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => {
                    if let Some(outcome) = self.accept(outcome) {
                        return Some(outcome);
                    }
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    let id = self.in_flight.take()?;
                    warn!("Scan worker stopped with scan {} in flight", id);
                    return Some(ScanOutcome::failed(id, ScanError::WorkerStopped.to_string(), 0));
                }
            }
        }
    }

    /// Block until the in-flight scan completes
    pub fn wait(&mut self) -> Result<ScanOutcome, ScanError> {
        if self.in_flight.is_none() {
            return Err(ScanError::WorkerStopped);
        }

        loop {
            let outcome = self.outcomes.recv().map_err(|_| {
                self.in_flight = None;
                ScanError::WorkerStopped
            })?;
            if let Some(outcome) = self.accept(outcome) {
                return Ok(outcome);
            }
        }
    }

    fn accept(&mut self, outcome: ScanOutcome) -> Option<ScanOutcome> {
        if self.in_flight == Some(outcome.id) {
            self.in_flight = None;
            Some(outcome)
        } else {
            debug!("Discarding stale scan outcome {}", outcome.id);
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Drop for ScanWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.requests.take();

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::tests::{
        sample_observations, FailingRecognizer, FixedRecognizer, PanickingRecognizer,
    };

    fn image() -> ScanImage {
        ScanImage::new(vec![0; 4], 1, 1)
    }

    #[test]
    fn test_submit_and_wait() {
        let mut worker = ScanWorker::spawn(Box::new(FixedRecognizer(sample_observations()))).unwrap();
        assert_eq!(worker.recognizer_name(), "fixed");

        let id = worker.submit(image(), RecognitionMapper::default()).unwrap();
        assert!(worker.is_busy());

        let outcome = worker.wait().unwrap();
        assert_eq!(outcome.id, id);
        assert_eq!(outcome.grid.initial().len(), 3);
        assert!(!worker.is_busy());
    }

    #[test]
    fn test_second_submit_while_busy_is_rejected() {
        let mut worker = ScanWorker::spawn(Box::new(FixedRecognizer(Vec::new()))).unwrap();

        let first = worker.submit(image(), RecognitionMapper::default()).unwrap();
        match worker.submit(image(), RecognitionMapper::default()) {
            Err(ScanError::Busy(id)) => assert_eq!(id, first),
            other => panic!("expected Busy, got {:?}", other),
        }

        worker.wait().unwrap();
        assert!(worker.submit(image(), RecognitionMapper::default()).is_ok());
    }

    #[test]
    fn test_try_complete_polls() {
        let mut worker = ScanWorker::spawn(Box::new(FixedRecognizer(sample_observations()))).unwrap();
        assert!(worker.try_complete().is_none());

        let id = worker.submit(image(), RecognitionMapper::default()).unwrap();
        let outcome = loop {
            if let Some(outcome) = worker.try_complete() {
                break outcome;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert_eq!(outcome.id, id);
    }

    #[test]
    fn test_failed_recognition_still_completes() {
        let mut worker = ScanWorker::spawn(Box::new(FailingRecognizer)).unwrap();
        worker.submit(image(), RecognitionMapper::default()).unwrap();

        let outcome = worker.wait().unwrap();
        assert!(outcome.grid.is_empty());
        assert!(outcome.error.is_some());
    }

    #[test]
    fn test_wait_without_request() {
        let mut worker = ScanWorker::spawn(Box::new(FixedRecognizer(Vec::new()))).unwrap();
        assert!(matches!(worker.wait(), Err(ScanError::WorkerStopped)));
    }

    #[test]
    fn test_recognizer_panic_fails_scan_and_keeps_worker() {
        let mut worker = ScanWorker::spawn(Box::new(PanickingRecognizer)).unwrap();
        let id = worker.submit(image(), RecognitionMapper::default()).unwrap();

        let outcome = worker.wait().unwrap();
        assert_eq!(outcome.id, id);
        assert!(outcome.grid.is_empty());
        assert!(outcome.error.unwrap().contains("engine crashed"));
        assert!(!worker.is_busy());

        // The thread survived and takes the next request
        worker.submit(image(), RecognitionMapper::default()).unwrap();
        assert!(!worker.wait().unwrap().is_ok());
    }

    #[test]
    fn test_dead_worker_reports_stopped_instead_of_busy() {
        let (requests, request_rx) = unbounded::<ScanRequest>();
        let (outcome_tx, outcomes) = unbounded::<ScanOutcome>();
        drop(request_rx);
        drop(outcome_tx);

        let id = Uuid::new_v4();
        let mut worker = ScanWorker {
            requests: Some(requests),
            outcomes,
            in_flight: Some(id),
            handle: None,
            recognizer_name: "gone".into(),
        };

        let outcome = worker.try_complete().unwrap();
        assert_eq!(outcome.id, id);
        assert!(outcome.grid.is_empty());
        assert!(!worker.is_busy());
        assert!(worker.try_complete().is_none());
        assert!(matches!(
            worker.submit(image(), RecognitionMapper::default()),
            Err(ScanError::WorkerStopped)
        ));
    }
}
