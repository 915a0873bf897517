//! Storage backends for applications, runs and decisions.

pub mod memory;

pub use memory::InMemoryAdmissionsStore;
