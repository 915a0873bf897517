//! Tests for error types

use bat_admissions::core::{AdmissionError, QueueError, StoreError, WorkerError};
use uuid::Uuid;

#[test]
fn test_improper_weights_error() {
    let err = AdmissionError::ImproperWeights {
        passion: 0.6,
        experience: 0.6,
    };
    assert_eq!(
        format!("{}", err),
        "improper weights: passion 0.6 + experience 0.6 must equal 1.0"
    );
}

#[test]
fn test_score_out_of_bounds_error() {
    let err = AdmissionError::ScoreOutOfBounds {
        field: "passion",
        value: 6,
    };
    assert_eq!(format!("{}", err), "score out of bounds: passion = 6 (allowed 0..=5)");
}

#[test]
fn test_duplicate_run_error() {
    let id = Uuid::nil();
    let err = StoreError::DuplicateRun(id);
    assert_eq!(format!("{}", err), format!("run already exists for event {id}"));
}

#[test]
fn test_queue_full_error() {
    let err = QueueError::QueueFull(8);
    assert_eq!(format!("{}", err), "queue full: max depth 8 reached");
}

#[test]
fn test_worker_error_is_transparent() {
    let err: WorkerError = StoreError::Backend("connection failed".to_string()).into();
    assert_eq!(format!("{}", err), "backend error: connection failed");

    let err: WorkerError = QueueError::UnknownTask("email:send".to_string()).into();
    assert_eq!(format!("{}", err), "unknown task kind: email:send");
}

#[test]
fn test_no_candidates_error() {
    let id = Uuid::nil();
    let err = WorkerError::NoCandidates(id);
    assert_eq!(format!("{}", err), format!("no admission candidates for event {id}"));
}
