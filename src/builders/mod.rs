//! Builders to construct the engine and worker from configuration.

pub mod engine_builder;

pub use engine_builder::{
    build_engine, build_queue, build_worker, build_worker_from_env, build_worker_with_overrides,
};
