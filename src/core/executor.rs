//! Task execution traits and payload abstraction.

use std::future::Future;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Marker trait for serializable task payloads.
///
/// Payloads travel through the task queue as JSON, so they must round-trip
/// through serde and be sendable across threads.
pub trait TaskPayload: Send + Sync + Serialize + for<'de> Deserialize<'de> + 'static {}

/// Blanket implementation: any type meeting the requirements is a TaskPayload.
impl<T> TaskPayload for T where T: Send + Sync + Serialize + for<'de> Deserialize<'de> + 'static {}

/// Abstraction for executing a task payload and producing a result.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use bat_admissions::core::TaskExecutor;
///
/// #[derive(Clone)]
/// struct Echo;
///
/// #[async_trait]
/// impl TaskExecutor<String, usize> for Echo {
///     type Error = std::convert::Infallible;
///
///     async fn execute(&self, payload: String) -> Result<usize, Self::Error> {
///         Ok(payload.len())
///     }
/// }
/// ```
#[async_trait]
pub trait TaskExecutor<P, T>: Send + Sync + 'static
where
    P: TaskPayload,
    T: Send + 'static,
{
    /// Error surfaced to the caller draining the queue.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute a task payload and return the result.
    ///
    /// Delivery is at-least-once: implementations must tolerate seeing the
    /// same payload more than once.
    async fn execute(&self, payload: P) -> Result<T, Self::Error>;
}

/// Spawner abstraction to run async work on an executor.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
