//! Configuration models for the engine, per-event capacities and the worker.

pub mod engine;

pub use engine::{EngineConfig, QuotaConfig, WorkerConfig};
