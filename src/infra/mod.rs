//! Infrastructure adapters for the task queue and admissions storage.

pub mod queue;
pub mod store;

pub use queue::InMemoryQueue;
pub use store::InMemoryAdmissionsStore;
