//! # BAT Admissions
//!
//! The Balanced Admissions Thresher decides which hackathon applicants are
//! admitted when demand exceeds capacity.
//!
//! Each applicant carries two review ratings (passion and experience) which
//! are combined into a weighted score. Applicants are split into four buckets
//! by school (University of Florida or not) and career stage (early or late),
//! and every bucket has its own seat quota. Seats are drawn by weighted random
//! sampling without replacement, so higher scores are more likely, but never
//! certain, to be admitted.
//!
//! ## Allocation order
//!
//! - **Teams first**: teams are sampled by average score and admitted
//!   atomically. A team is admitted only if every member's bucket has room and
//!   the team seat ceiling is not reached; otherwise the whole team is rejected.
//! - **Individuals second**: each bucket admits its top sampled candidates.
//!   Unused quota rolls over to the sibling bucket (early and late career of
//!   the same school) across two passes.
//!
//! ## Running an allocation
//!
//! ```rust,ignore
//! use bat_admissions::config::QuotaConfig;
//! use bat_admissions::core::{BatEngine, WeightedSampler};
//!
//! let engine = BatEngine::new(0.5, 0.5)?;
//! let pool = engine.score_profiles(&profiles);
//! let mut sampler = WeightedSampler::from_seed(7);
//! let outcome = engine.allocate(pool.candidates, QuotaConfig::default().initial_state(), &mut sampler);
//! println!("admitted {}", outcome.accepted.len());
//! ```
//!
//! ## Queued runs
//!
//! In production a run is triggered by an `admissions:calculate` task that may
//! be delivered more than once. [`runtime::AdmissionsWorker`] consumes those
//! tasks, persists the decisions through the [`core::DecisionStore`]
//! collaborator and turns duplicate deliveries into no-ops.
//!
//! For complete examples, see:
//! - `tests/admission_run_test.rs` - End-to-end worker runs

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Scoring, classification, quota accounting, sampling and admission.
pub mod core;
/// Configuration models for weights, capacities and the worker.
pub mod config;
/// Builders to construct the engine and worker from configuration.
pub mod builders;
/// Infrastructure adapters for the task queue and admissions storage.
pub mod infra;
/// Task payloads, the admissions worker and runtime adapters.
pub mod runtime;
/// Shared utilities.
pub mod util;
