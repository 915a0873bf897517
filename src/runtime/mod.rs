//! Task payloads, the admissions worker and runtime adapters.

pub mod api;
#[cfg(feature = "tokio-runtime")]
pub mod tokio_spawner;
pub mod worker;

pub use api::{run_status, CalculateAdmissionsPayload, RunStatusResponse, TaskOutcome, TASK_CALCULATE_ADMISSIONS};
#[cfg(feature = "tokio-runtime")]
pub use tokio_spawner::TokioSpawner;
pub use worker::{drain_queue, spawn_drain, AdmissionsWorker, DrainSummary};
