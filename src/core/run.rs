//! Run records and the collaborator traits the worker talks to.

use serde::{Deserialize, Serialize};

use crate::config::QuotaConfig;
use crate::core::candidate::ApplicationProfile;
use crate::core::StoreError;
use crate::util::ids::{ApplicantId, EventId, RunId};

/// Status of an admission run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatRunStatus {
    /// Allocation in progress.
    Running,
    /// Decisions persisted.
    Completed,
    /// Run aborted; a new run may be requested.
    Failed,
    /// Decisions of a completed run were released to applicants.
    Released,
}

impl BatRunStatus {
    /// Whether this status blocks a new run for the same event.
    pub const fn blocks_new_run(self) -> bool {
        matches!(self, Self::Running | Self::Completed | Self::Released)
    }

    /// Whether the run's decisions are final.
    pub const fn is_decided(self) -> bool {
        matches!(self, Self::Completed | Self::Released)
    }
}

/// One admission run for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatRun {
    /// Run identifier.
    pub id: RunId,
    /// Event the run decides.
    pub event_id: EventId,
    /// Current status.
    pub status: BatRunStatus,
    /// Creation timestamp in milliseconds since epoch.
    pub created_at_ms: u128,
    /// Completion timestamp, once the run left `Running`.
    pub finished_at_ms: Option<u128>,
}

/// Persisted decisions of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatResult {
    /// Run that produced the decisions.
    pub run_id: RunId,
    /// Event the decisions apply to.
    pub event_id: EventId,
    /// Admitted applicants.
    pub accepted: Vec<ApplicantId>,
    /// Rejected applicants.
    pub rejected: Vec<ApplicantId>,
    /// Applicants left out because their scores were unusable.
    pub excluded: Vec<ApplicantId>,
    /// Creation timestamp in milliseconds since epoch.
    pub created_at_ms: u128,
}

/// Data-access collaborator supplying applications and per-event capacities.
pub trait CandidateSource {
    /// All applications submitted to `event_id`.
    fn list_candidates(&self, event_id: EventId) -> Result<Vec<ApplicationProfile>, StoreError>;

    /// Capacity override for `event_id`; `None` means use the configured default.
    fn quota_for(&self, event_id: EventId) -> Result<Option<QuotaConfig>, StoreError>;
}

/// Persistence collaborator for runs and their decisions.
pub trait DecisionStore {
    /// Register a new `Running` run. Fails with `DuplicateRun` if the event
    /// already has a running or completed run.
    fn add_run(&mut self, event_id: EventId) -> Result<BatRun, StoreError>;

    /// Move a run to `status`.
    fn update_run_status(&mut self, run_id: RunId, status: BatRunStatus) -> Result<(), StoreError>;

    /// Runs recorded for an event, oldest first.
    fn runs_for_event(&self, event_id: EventId) -> Result<Vec<BatRun>, StoreError>;

    /// Persist decisions. Fails with `DuplicateResult` if the run already has one.
    fn add_result(&mut self, result: BatResult) -> Result<(), StoreError>;

    /// Results recorded for an event, oldest first.
    fn results_for_event(&self, event_id: EventId) -> Result<Vec<BatResult>, StoreError>;

    /// Release the decisions of a completed run of `event_id` and mark it
    /// `Released`.
    ///
    /// Fails with `EventNotFound` for an unknown event, `RunNotFound`,
    /// `RunMismatch` if the run belongs to another event, `RunStatusInvalid`
    /// unless the run is `Completed`, and `NoAcceptedApplicants` if the run
    /// admitted nobody.
    fn release_decisions(&mut self, event_id: EventId, run_id: RunId) -> Result<BatRun, StoreError>;

    /// Flip the event's "reviews finished" flag.
    fn mark_reviews_finished(&mut self, event_id: EventId) -> Result<(), StoreError>;

    /// Whether the event's reviews are marked finished.
    fn reviews_finished(&self, event_id: EventId) -> Result<bool, StoreError>;
}
