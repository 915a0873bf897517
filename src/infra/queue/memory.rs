//! In-memory FIFO task queue.

use std::collections::VecDeque;

use crate::core::{QueueError, TaskEnvelope, TaskQueue};

/// In-memory queue storing task envelopes in arrival order.
///
/// Duplicate envelopes are kept; consumers must tolerate redelivery.
pub struct InMemoryQueue {
    max_depth: usize,
    tasks: VecDeque<TaskEnvelope>,
}

impl InMemoryQueue {
    /// Create a new in-memory queue with a maximum depth.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            tasks: VecDeque::with_capacity(max_depth.min(1024)),
        }
    }
}

impl TaskQueue for InMemoryQueue {
    fn enqueue(&mut self, task: TaskEnvelope) -> Result<(), QueueError> {
        if self.len() >= self.max_depth() {
            return Err(QueueError::QueueFull(self.max_depth));
        }
        self.tasks.push_back(task);
        Ok(())
    }

    fn dequeue(&mut self) -> Result<Option<TaskEnvelope>, QueueError> {
        Ok(self.tasks.pop_front())
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }
}
