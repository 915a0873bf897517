//! Build engine components from an [`EngineConfig`].

use std::env;
use std::sync::Arc;

use anyhow::Context;
use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::core::{AdmissionError, AppResult, AuditSink, BatEngine, CandidateSource, DecisionStore};
use crate::infra::InMemoryQueue;
use crate::runtime::AdmissionsWorker;

/// Validate the configuration and build the engine it describes.
pub fn build_engine(cfg: &EngineConfig) -> Result<BatEngine, AdmissionError> {
    cfg.quota.validate()?;
    BatEngine::new(cfg.passion_weight, cfg.experience_weight)
}

/// Build a worker over `store`, auditing into `audit`.
pub fn build_worker<S, A>(
    cfg: &EngineConfig,
    store: Arc<Mutex<S>>,
    audit: Arc<Mutex<A>>,
) -> Result<AdmissionsWorker<S, A>, AdmissionError>
where
    S: CandidateSource + DecisionStore + Send + 'static,
    A: AuditSink + 'static,
{
    let engine = build_engine(cfg)?;
    tracing::info!(
        queue = %cfg.worker.queue_name,
        passion_weight = cfg.passion_weight,
        experience_weight = cfg.experience_weight,
        seeded = cfg.seed.is_some(),
        "admissions worker ready"
    );
    Ok(AdmissionsWorker::with_audit(engine, cfg.clone(), store, audit))
}

/// Build a worker from `.env` and `BAT_*` environment overrides.
pub fn build_worker_from_env<S, A>(store: Arc<Mutex<S>>, audit: Arc<Mutex<A>>) -> AppResult<AdmissionsWorker<S, A>>
where
    S: CandidateSource + DecisionStore + Send + 'static,
    A: AuditSink + 'static,
{
    dotenvy::dotenv().ok();
    build_worker_with_overrides(|key| env::var(key).ok(), store, audit)
}

/// Build a worker from the default configuration with `BAT_*` overrides read
/// through `lookup`.
pub fn build_worker_with_overrides<S, A>(
    lookup: impl Fn(&str) -> Option<String>,
    store: Arc<Mutex<S>>,
    audit: Arc<Mutex<A>>,
) -> AppResult<AdmissionsWorker<S, A>>
where
    S: CandidateSource + DecisionStore + Send + 'static,
    A: AuditSink + 'static,
{
    let cfg = EngineConfig::default()
        .with_overrides(lookup)
        .and_then(|cfg| cfg.validate().map(|()| cfg))
        .map_err(anyhow::Error::msg)
        .context("loading BAT_* configuration")?;
    build_worker(&cfg, store, audit).context("building admissions worker")
}

/// In-memory queue sized from the worker settings.
pub fn build_queue(cfg: &EngineConfig) -> InMemoryQueue {
    InMemoryQueue::new(cfg.worker.max_queue_depth)
}
