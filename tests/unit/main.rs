//! Unit tests for individual components

mod audit_test;
mod config_test;
mod engine_test;
mod error_test;
mod properties_test;
mod queue_test;
