//! Tests for task envelopes and the in-memory queue

use bat_admissions::core::{QueueError, TaskQueue};
use bat_admissions::infra::InMemoryQueue;
use bat_admissions::runtime::{CalculateAdmissionsPayload, TASK_CALCULATE_ADMISSIONS};
use uuid::Uuid;

#[test]
fn test_duplicate_deliveries_are_queued() {
    let event = Uuid::new_v4();
    let mut q = InMemoryQueue::new(4);
    for _ in 0..2 {
        q.enqueue(CalculateAdmissionsPayload::for_event(event).into_envelope().unwrap())
            .unwrap();
    }
    assert_eq!(q.len(), 2);

    let first = q.dequeue().unwrap().unwrap();
    assert_eq!(first.kind, TASK_CALCULATE_ADMISSIONS);
    assert_eq!(CalculateAdmissionsPayload::from_envelope(&first).unwrap().event_id, event);
}

#[test]
fn test_queue_full_reports_depth() {
    let mut q = InMemoryQueue::new(1);
    let envelope = CalculateAdmissionsPayload::for_event(Uuid::new_v4())
        .into_envelope()
        .unwrap();
    q.enqueue(envelope.clone()).unwrap();
    assert_eq!(q.enqueue(envelope), Err(QueueError::QueueFull(1)));
}

#[test]
fn test_payload_json_shape() {
    let event = Uuid::nil();
    let envelope = CalculateAdmissionsPayload::for_event(event).into_envelope().unwrap();
    let value: serde_json::Value = serde_json::from_str(&envelope.payload).unwrap();
    assert_eq!(value["event_id"], serde_json::json!(event.to_string()));
    assert!(value["bat_run_id"].is_null());
}
