//! Admission engine: scoring, classification, quota accounting, sampling and admission.

pub mod audit;
pub mod candidate;
pub mod classify;
pub mod engine;
pub mod error;
pub mod executor;
pub mod individual;
pub mod quota;
pub mod run;
pub mod sampler;
pub mod score;
pub mod stats;
pub mod task;
pub mod team;

pub use audit::{build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink};
pub use candidate::{AdmissionCandidate, ApplicationProfile, BucketType, TeamEvaluationData};
pub use classify::{classify, group_by_bucket_type, BucketPools};
pub use engine::{AdmissionOutcome, BatEngine, ScoredPool};
pub use error::{AdmissionError, AppResult, QueueError, StoreError, WorkerError};
pub use executor::{Spawn, TaskExecutor, TaskPayload};
pub use individual::{IndividualAdmitter, ROLLOVER_PASSES};
pub use quota::{BucketConfig, CategoryQuota, QuotaState, TeamRequirement};
pub use run::{BatResult, BatRun, BatRunStatus, CandidateSource, DecisionStore};
pub use sampler::WeightedSampler;
pub use score::{ScoreCalculator, BASE_CONSTANT};
pub use stats::{AdmissionStats, ScoreStats};
pub use task::{TaskEnvelope, TaskQueue};
pub use team::TeamAdmitter;
