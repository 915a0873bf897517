//! In-memory admissions store for tests and development.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::config::QuotaConfig;
use crate::core::{
    ApplicationProfile, BatResult, BatRun, BatRunStatus, CandidateSource, DecisionStore, StoreError,
};
use crate::util::clock::now_ms;
use crate::util::ids::{EventId, RunId};

/// Holds applications, capacity overrides, runs and results in process memory.
#[derive(Debug, Default)]
pub struct InMemoryAdmissionsStore {
    profiles: HashMap<EventId, Vec<ApplicationProfile>>,
    quotas: HashMap<EventId, QuotaConfig>,
    runs: Vec<BatRun>,
    results: Vec<BatResult>,
    reviews_finished: HashSet<EventId>,
}

impl InMemoryAdmissionsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append applications for an event.
    pub fn insert_profiles(&mut self, event_id: EventId, profiles: impl IntoIterator<Item = ApplicationProfile>) {
        self.profiles.entry(event_id).or_default().extend(profiles);
    }

    /// Set the capacity override for an event.
    pub fn set_quota(&mut self, event_id: EventId, quota: QuotaConfig) {
        self.quotas.insert(event_id, quota);
    }

    fn run_mut(&mut self, run_id: RunId) -> Result<&mut BatRun, StoreError> {
        self.runs
            .iter_mut()
            .find(|r| r.id == run_id)
            .ok_or(StoreError::RunNotFound(run_id))
    }
}

impl CandidateSource for InMemoryAdmissionsStore {
    fn list_candidates(&self, event_id: EventId) -> Result<Vec<ApplicationProfile>, StoreError> {
        Ok(self.profiles.get(&event_id).cloned().unwrap_or_default())
    }

    fn quota_for(&self, event_id: EventId) -> Result<Option<QuotaConfig>, StoreError> {
        Ok(self.quotas.get(&event_id).copied())
    }
}

impl DecisionStore for InMemoryAdmissionsStore {
    fn add_run(&mut self, event_id: EventId) -> Result<BatRun, StoreError> {
        if self
            .runs
            .iter()
            .any(|r| r.event_id == event_id && r.status.blocks_new_run())
        {
            return Err(StoreError::DuplicateRun(event_id));
        }
        let run = BatRun {
            id: Uuid::new_v4(),
            event_id,
            status: BatRunStatus::Running,
            created_at_ms: now_ms(),
            finished_at_ms: None,
        };
        self.runs.push(run.clone());
        Ok(run)
    }

    fn update_run_status(&mut self, run_id: RunId, status: BatRunStatus) -> Result<(), StoreError> {
        let run = self.run_mut(run_id)?;
        run.status = status;
        run.finished_at_ms = match status {
            BatRunStatus::Running => None,
            BatRunStatus::Completed | BatRunStatus::Failed => Some(now_ms()),
            BatRunStatus::Released => run.finished_at_ms.or_else(|| Some(now_ms())),
        };
        Ok(())
    }

    fn runs_for_event(&self, event_id: EventId) -> Result<Vec<BatRun>, StoreError> {
        Ok(self.runs.iter().filter(|r| r.event_id == event_id).cloned().collect())
    }

    fn add_result(&mut self, result: BatResult) -> Result<(), StoreError> {
        if !self.runs.iter().any(|r| r.id == result.run_id) {
            return Err(StoreError::RunNotFound(result.run_id));
        }
        if self.results.iter().any(|r| r.run_id == result.run_id) {
            return Err(StoreError::DuplicateResult(result.run_id));
        }
        self.results.push(result);
        Ok(())
    }

    fn results_for_event(&self, event_id: EventId) -> Result<Vec<BatResult>, StoreError> {
        Ok(self
            .results
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    fn release_decisions(&mut self, event_id: EventId, run_id: RunId) -> Result<BatRun, StoreError> {
        if !self.profiles.contains_key(&event_id) && !self.runs.iter().any(|r| r.event_id == event_id) {
            return Err(StoreError::EventNotFound(event_id));
        }
        let run = self
            .runs
            .iter()
            .find(|r| r.id == run_id)
            .ok_or(StoreError::RunNotFound(run_id))?;
        if run.event_id != event_id {
            return Err(StoreError::RunMismatch { run_id, event_id });
        }
        if run.status != BatRunStatus::Completed {
            return Err(StoreError::RunStatusInvalid {
                run_id,
                status: run.status,
            });
        }
        let admitted = self
            .results
            .iter()
            .any(|r| r.run_id == run_id && !r.accepted.is_empty());
        if !admitted {
            return Err(StoreError::NoAcceptedApplicants(run_id));
        }

        self.update_run_status(run_id, BatRunStatus::Released)?;
        self.run_mut(run_id).cloned()
    }

    fn mark_reviews_finished(&mut self, event_id: EventId) -> Result<(), StoreError> {
        self.reviews_finished.insert(event_id);
        Ok(())
    }

    fn reviews_finished(&self, event_id: EventId) -> Result<bool, StoreError> {
        Ok(self.reviews_finished.contains(&event_id))
    }
}
