//! Error types for scoring, persistence, queueing, and worker operations.

use thiserror::Error;

use crate::core::run::BatRunStatus;
use crate::util::ids::{ApplicantId, EventId, RunId};

/// Errors produced while constructing the engine or preparing candidates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdmissionError {
    /// Passion and experience weights do not add up to 1.0.
    #[error("improper weights: passion {passion} + experience {experience} must equal 1.0")]
    ImproperWeights {
        /// Configured passion weight.
        passion: f64,
        /// Configured experience weight.
        experience: f64,
    },
    /// A review sub-score lies outside `[0, 5]`.
    #[error("score out of bounds: {field} = {value} (allowed 0..=5)")]
    ScoreOutOfBounds {
        /// Which sub-score was rejected.
        field: &'static str,
        /// The offending value.
        value: i32,
    },
    /// An application has not received both review ratings yet.
    #[error("applicant {0} is missing review ratings")]
    MissingRatings(ApplicantId),
    /// A quota configuration cannot be turned into a run ledger.
    #[error("invalid quota: {0}")]
    InvalidQuota(String),
}

/// Errors raised by the decision store collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The event already has an active or completed run.
    #[error("run already exists for event {0}")]
    DuplicateRun(EventId),
    /// A result has already been recorded for the run.
    #[error("result already exists for run {0}")]
    DuplicateResult(RunId),
    /// No run with that identifier exists.
    #[error("run not found: {0}")]
    RunNotFound(RunId),
    /// No event with that identifier exists.
    #[error("event not found: {0}")]
    EventNotFound(EventId),
    /// The run belongs to a different event.
    #[error("run {run_id} does not belong to event {event_id}")]
    RunMismatch {
        /// Requested run.
        run_id: RunId,
        /// Event named by the caller.
        event_id: EventId,
    },
    /// The run is not in a state that allows the operation.
    #[error("run {run_id} is {status:?}, expected Completed")]
    RunStatusInvalid {
        /// Requested run.
        run_id: RunId,
        /// Status the run is in.
        status: BatRunStatus,
    },
    /// The run admitted nobody, so there is nothing to release.
    #[error("run {0} has no accepted applicants")]
    NoAcceptedApplicants(RunId),
    /// Backend-specific failure with context.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors raised by the task queue and task envelopes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Queue reached its configured depth.
    #[error("queue full: max depth {0} reached")]
    QueueFull(usize),
    /// A payload could not be encoded or decoded.
    #[error("payload decode error: {0}")]
    Decode(String),
    /// The envelope names a task kind no handler is registered for.
    #[error("unknown task kind: {0}")]
    UnknownTask(String),
}

/// Errors surfaced by the admissions worker for a single task.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Scoring or engine failure.
    #[error(transparent)]
    Admission(#[from] AdmissionError),
    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Queue or envelope failure.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// The event has no applications to decide on.
    #[error("no admission candidates for event {0}")]
    NoCandidates(EventId),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
