//! Audit sink implementations.
//!
//! Admission runs record one event per lifecycle step (start, complete, fail,
//! skip) so duplicate deliveries and failures can be traced after the fact.

use std::collections::VecDeque;

use crate::util::clock::now_ms;
use crate::util::ids::{EventId, RunId};

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Audit record identifier.
    pub audit_id: String,
    /// Event (hackathon) the run belongs to.
    pub event_id: EventId,
    /// Run identifier, when one was registered.
    pub run_id: Option<RunId>,
    /// Action taken (start, complete, fail, skip).
    pub action: String,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// Additional context.
    pub payload: Option<String>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }

    /// Events recorded for one hackathon event.
    pub fn events_for(&self, event_id: EventId) -> Vec<AuditEvent> {
        self.events.iter().filter(|e| e.event_id == event_id).cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Sink that only forwards events to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&mut self, event: AuditEvent) {
        tracing::info!(
            audit_id = %event.audit_id,
            event_id = %event.event_id,
            run_id = ?event.run_id,
            action = %event.action,
            payload = ?event.payload,
            "audit"
        );
    }
}

/// Helper to build an audit event from context.
pub fn build_audit_event(
    event_id: EventId,
    run_id: Option<RunId>,
    action: impl Into<String>,
    payload: Option<String>,
) -> AuditEvent {
    let action = action.into();
    let created_at_ms = now_ms();
    AuditEvent {
        audit_id: uuid::Uuid::new_v4().to_string(),
        event_id,
        run_id,
        action,
        created_at_ms,
        payload,
    }
}
