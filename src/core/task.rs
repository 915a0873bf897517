//! Queued task envelopes and the queue abstraction.

use serde::{Deserialize, Serialize};

use crate::core::{QueueError, TaskPayload};
use crate::util::clock::now_ms;

/// A task as it travels through the queue: a kind tag plus a JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    /// Task kind, e.g. `admissions:calculate`.
    pub kind: String,
    /// JSON-encoded payload.
    pub payload: String,
    /// Enqueue timestamp in milliseconds since epoch.
    pub enqueued_at_ms: u128,
}

impl TaskEnvelope {
    /// Encode `payload` under `kind`.
    pub fn encode<P: TaskPayload>(kind: impl Into<String>, payload: &P) -> Result<Self, QueueError> {
        let payload = serde_json::to_string(payload).map_err(|e| QueueError::Decode(e.to_string()))?;
        Ok(Self {
            kind: kind.into(),
            payload,
            enqueued_at_ms: now_ms(),
        })
    }

    /// Decode the payload, checking the kind first.
    pub fn decode<P: TaskPayload>(&self, expected_kind: &str) -> Result<P, QueueError> {
        if self.kind != expected_kind {
            return Err(QueueError::UnknownTask(self.kind.clone()));
        }
        serde_json::from_str(&self.payload).map_err(|e| QueueError::Decode(e.to_string()))
    }
}

/// Abstraction for queue backends.
///
/// Delivery is at-least-once; queues do not deduplicate.
pub trait TaskQueue {
    /// Enqueue a task if space permits.
    fn enqueue(&mut self, task: TaskEnvelope) -> Result<(), QueueError>;
    /// Dequeue the oldest task.
    fn dequeue(&mut self) -> Result<Option<TaskEnvelope>, QueueError>;
    /// Maximum depth allowed for this queue.
    fn max_depth(&self) -> usize;
    /// Current depth.
    fn len(&self) -> usize;
    /// Whether the queue holds no tasks.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
