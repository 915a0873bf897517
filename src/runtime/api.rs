//! Task payloads and worker-facing request/response models.

use serde::{Deserialize, Serialize};

use crate::core::{BatResult, BatRun, BatRunStatus, DecisionStore, QueueError, StoreError, TaskEnvelope};
use crate::util::ids::{EventId, RunId};

/// Task kind for an admissions calculation.
pub const TASK_CALCULATE_ADMISSIONS: &str = "admissions:calculate";

/// Payload of an `admissions:calculate` task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateAdmissionsPayload {
    /// Event to decide.
    pub event_id: EventId,
    /// Run identifier chosen by the requester, carried for tracing.
    pub bat_run_id: Option<RunId>,
}

impl CalculateAdmissionsPayload {
    /// Payload for `event_id` without a requester run id.
    pub const fn for_event(event_id: EventId) -> Self {
        Self {
            event_id,
            bat_run_id: None,
        }
    }

    /// Wrap this payload in a queue envelope.
    pub fn into_envelope(self) -> Result<TaskEnvelope, QueueError> {
        TaskEnvelope::encode(TASK_CALCULATE_ADMISSIONS, &self)
    }

    /// Decode an `admissions:calculate` envelope.
    pub fn from_envelope(envelope: &TaskEnvelope) -> Result<Self, QueueError> {
        envelope.decode(TASK_CALCULATE_ADMISSIONS)
    }
}

/// What a delivery of `admissions:calculate` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskOutcome {
    /// A run completed and its decisions were persisted.
    Completed {
        /// Run that produced the decisions.
        run_id: RunId,
        /// Number of admitted applicants.
        accepted: usize,
        /// Number of rejected applicants.
        rejected: usize,
        /// Number of applicants excluded for unusable ratings.
        excluded: usize,
    },
    /// The delivery was a duplicate and nothing changed.
    Skipped {
        /// Why the delivery was skipped.
        reason: String,
    },
}

impl TaskOutcome {
    /// Completed outcome summarising persisted decisions.
    pub fn from_result(result: &BatResult) -> Self {
        Self::Completed {
            run_id: result.run_id,
            accepted: result.accepted.len(),
            rejected: result.rejected.len(),
            excluded: result.excluded.len(),
        }
    }
}

/// Run status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatusResponse {
    /// Event identifier.
    pub event_id: EventId,
    /// Most recent run, if any.
    pub latest_run: Option<BatRun>,
    /// Whether reviews are marked finished.
    pub reviews_finished: bool,
}

impl RunStatusResponse {
    /// Status of the most recent run, if any.
    pub fn status(&self) -> Option<BatRunStatus> {
        self.latest_run.as_ref().map(|r| r.status)
    }
}

/// Look up the run status for an event.
pub fn run_status<S: DecisionStore + ?Sized>(store: &S, event_id: EventId) -> Result<RunStatusResponse, StoreError> {
    let latest_run = store
        .runs_for_event(event_id)?
        .into_iter()
        .max_by_key(|r| r.created_at_ms);
    Ok(RunStatusResponse {
        event_id,
        latest_run,
        reviews_finished: store.reviews_finished(event_id)?,
    })
}
