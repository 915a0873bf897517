//! The admissions worker: consumes `admissions:calculate` tasks and drives one
//! engine run per event through the store.
//!
//! Delivery is at-least-once. A delivery for an event that already has a
//! completed run is a no-op, and a concurrent duplicate is stopped by the
//! store's `DuplicateRun` conflict. Both are reported as
//! [`TaskOutcome::Skipped`] rather than errors so the transport does not retry.
//!
//! The persisted [`BatResult`] is the commit point of a run. If a later write
//! fails, the next delivery finishes that run from its stored decisions
//! instead of allocating again.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::core::{
    build_audit_event, AdmissionStats, AuditSink, BatEngine, BatResult, BatRun, BatRunStatus, CandidateSource,
    DecisionStore, QueueError, Spawn, StoreError, TaskExecutor, TaskQueue, TracingAuditSink, WeightedSampler,
    WorkerError,
};
use crate::runtime::api::{CalculateAdmissionsPayload, TaskOutcome};
use crate::util::clock::now_ms;
use crate::util::ids::{fold_u64, EventId, RunId};

/// Executes admission runs against a shared store.
pub struct AdmissionsWorker<S, A = TracingAuditSink> {
    engine: BatEngine,
    config: EngineConfig,
    store: Arc<Mutex<S>>,
    audit: Arc<Mutex<A>>,
}

impl<S> AdmissionsWorker<S, TracingAuditSink>
where
    S: CandidateSource + DecisionStore + Send + 'static,
{
    /// Worker that audits through the tracing subscriber.
    pub fn new(engine: BatEngine, config: EngineConfig, store: Arc<Mutex<S>>) -> Self {
        Self::with_audit(engine, config, store, Arc::new(Mutex::new(TracingAuditSink)))
    }
}

impl<S, A> AdmissionsWorker<S, A>
where
    S: CandidateSource + DecisionStore + Send + 'static,
    A: AuditSink + 'static,
{
    /// Worker with an explicit audit sink.
    pub fn with_audit(engine: BatEngine, config: EngineConfig, store: Arc<Mutex<S>>, audit: Arc<Mutex<A>>) -> Self {
        Self {
            engine,
            config,
            store,
            audit,
        }
    }

    /// Shared handle to the store.
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Shared handle to the audit sink.
    pub fn audit(&self) -> Arc<Mutex<A>> {
        Arc::clone(&self.audit)
    }

    /// Configuration the worker runs with.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle one delivery of `admissions:calculate`.
    ///
    /// The store lock is held for the whole run, so runs through one worker
    /// never interleave.
    pub fn calculate_admissions(&self, payload: CalculateAdmissionsPayload) -> Result<TaskOutcome, WorkerError> {
        let event_id = payload.event_id;
        let span = tracing::info_span!("calculate_admissions", event_id = %event_id);
        let _entered = span.enter();

        let mut store = self.store.lock();

        if let Some(done) = store
            .runs_for_event(event_id)?
            .into_iter()
            .find(|r| r.status.is_decided())
        {
            return Ok(self.skip(event_id, Some(done.id), "event already has a completed run"));
        }
        if let Some(committed) = store.results_for_event(event_id)?.into_iter().next() {
            tracing::warn!(run_id = %committed.run_id, "finishing run from persisted decisions");
            finish_run(&mut *store, &committed)?;
            let outcome = TaskOutcome::from_result(&committed);
            self.record(event_id, Some(committed.run_id), "complete", serde_json::to_string(&outcome).ok());
            return Ok(outcome);
        }

        let run = match store.add_run(event_id) {
            Ok(run) => run,
            Err(StoreError::DuplicateRun(_)) => {
                return Ok(self.skip(event_id, None, "run already in progress for event"));
            }
            Err(err) => return Err(err.into()),
        };
        self.record(
            event_id,
            Some(run.id),
            "start",
            payload.bat_run_id.map(|id| format!("requested_run_id={id}")),
        );

        match self.execute_run(&mut *store, &run) {
            Ok(outcome) => {
                self.record(event_id, Some(run.id), "complete", serde_json::to_string(&outcome).ok());
                Ok(outcome)
            }
            Err(err) => {
                tracing::error!(run_id = %run.id, error = %err, "admission run failed");
                if let Err(status_err) = store.update_run_status(run.id, BatRunStatus::Failed) {
                    tracing::error!(run_id = %run.id, error = %status_err, "could not mark run failed");
                }
                self.record(event_id, Some(run.id), "fail", Some(err.to_string()));
                Err(err)
            }
        }
    }

    fn execute_run(&self, store: &mut S, run: &BatRun) -> Result<TaskOutcome, WorkerError> {
        let event_id = run.event_id;
        let profiles = store.list_candidates(event_id)?;
        if profiles.is_empty() {
            return Err(WorkerError::NoCandidates(event_id));
        }

        let pool = self.engine.score_profiles(&profiles);
        AdmissionStats::from_candidates(&pool.candidates).log();

        let quota_config = store.quota_for(event_id)?.unwrap_or(self.config.quota);
        quota_config.validate()?;

        let mut sampler = self.sampler_for(event_id);
        let outcome = self
            .engine
            .allocate(pool.candidates, quota_config.initial_state(), &mut sampler);

        let result = BatResult {
            run_id: run.id,
            event_id,
            accepted: outcome.accepted_ids(),
            rejected: outcome.rejected_ids(),
            excluded: pool.excluded.iter().map(|(id, _)| *id).collect(),
            created_at_ms: now_ms(),
        };
        let report = TaskOutcome::from_result(&result);

        store.add_result(result.clone())?;
        finish_run(store, &result)?;

        tracing::info!(
            run_id = %run.id,
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            excluded = pool.excluded.len(),
            team_slots_left = outcome.quota.team_slots_left,
            "admission run completed"
        );
        Ok(report)
    }

    /// Release the decisions of a completed run.
    pub fn release_decisions(&self, event_id: EventId, run_id: RunId) -> Result<BatRun, WorkerError> {
        let released = self.store.lock().release_decisions(event_id, run_id);
        match released {
            Ok(run) => {
                tracing::info!(event_id = %event_id, run_id = %run_id, "decisions released");
                self.record(event_id, Some(run_id), "release", None);
                Ok(run)
            }
            Err(err) => {
                tracing::warn!(event_id = %event_id, run_id = %run_id, error = %err, "release refused");
                Err(err.into())
            }
        }
    }

    fn sampler_for(&self, event_id: EventId) -> WeightedSampler {
        match self.config.seed {
            Some(seed) => WeightedSampler::from_seed(seed ^ fold_u64(&event_id)),
            None => WeightedSampler::from_clock(),
        }
    }

    fn skip(&self, event_id: EventId, run_id: Option<RunId>, reason: &str) -> TaskOutcome {
        tracing::warn!(event_id = %event_id, reason, "skipping duplicate delivery");
        self.record(event_id, run_id, "skip", Some(reason.to_string()));
        TaskOutcome::Skipped {
            reason: reason.to_string(),
        }
    }

    fn record(&self, event_id: EventId, run_id: Option<RunId>, action: &str, payload: Option<String>) {
        self.audit
            .lock()
            .record(build_audit_event(event_id, run_id, action, payload));
    }
}

/// Writes that follow a persisted result. Both are idempotent.
fn finish_run<S: DecisionStore>(store: &mut S, result: &BatResult) -> Result<(), StoreError> {
    store.update_run_status(result.run_id, BatRunStatus::Completed)?;
    store.mark_reviews_finished(result.event_id)
}

#[async_trait]
impl<S, A> TaskExecutor<CalculateAdmissionsPayload, TaskOutcome> for AdmissionsWorker<S, A>
where
    S: CandidateSource + DecisionStore + Send + 'static,
    A: AuditSink + 'static,
{
    type Error = WorkerError;

    async fn execute(&self, payload: CalculateAdmissionsPayload) -> Result<TaskOutcome, Self::Error> {
        self.calculate_admissions(payload)
    }
}

/// Tally of one queue drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// Runs that completed.
    pub completed: usize,
    /// Duplicate deliveries skipped.
    pub skipped: usize,
    /// Runs that failed.
    pub failed: usize,
    /// Envelopes that could not be decoded.
    pub dropped: usize,
}

/// Process queued envelopes one at a time until the queue is empty.
///
/// The queue lock is only held while dequeuing.
pub async fn drain_queue<Q, E>(queue: &Mutex<Q>, executor: &E) -> Result<DrainSummary, QueueError>
where
    Q: TaskQueue,
    E: TaskExecutor<CalculateAdmissionsPayload, TaskOutcome>,
{
    let mut summary = DrainSummary::default();
    loop {
        let next = queue.lock().dequeue()?;
        let Some(envelope) = next else {
            break;
        };
        let payload = match CalculateAdmissionsPayload::from_envelope(&envelope) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(kind = %envelope.kind, error = %err, "dropping undecodable task");
                summary.dropped += 1;
                continue;
            }
        };
        match executor.execute(payload).await {
            Ok(TaskOutcome::Completed { .. }) => summary.completed += 1,
            Ok(TaskOutcome::Skipped { .. }) => summary.skipped += 1,
            Err(err) => {
                tracing::error!(event_id = %payload.event_id, error = %err, "task failed");
                summary.failed += 1;
            }
        }
    }
    tracing::debug!(?summary, "queue drained");
    Ok(summary)
}

/// Drain `queue` in the background on `spawner`.
pub fn spawn_drain<Q, E, Sp>(spawner: &Sp, queue: Arc<Mutex<Q>>, executor: Arc<E>)
where
    Q: TaskQueue + Send + 'static,
    E: TaskExecutor<CalculateAdmissionsPayload, TaskOutcome>,
    Sp: Spawn,
{
    spawner.spawn(async move {
        if let Err(err) = drain_queue(&*queue, &*executor).await {
            tracing::error!(error = %err, "queue drain aborted");
        }
    });
}
