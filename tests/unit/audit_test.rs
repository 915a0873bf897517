//! Tests for audit sinks

use bat_admissions::core::{build_audit_event, AuditSink, InMemoryAuditSink};
use uuid::Uuid;

#[test]
fn test_in_memory_sink_is_bounded() {
    let event = Uuid::new_v4();
    let mut sink = InMemoryAuditSink::new(2);
    sink.record(build_audit_event(event, None, "start", None));
    sink.record(build_audit_event(event, None, "fail", None));
    sink.record(build_audit_event(event, None, "start", Some("retry".into())));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, "fail");
    assert_eq!(events[1].payload.as_deref(), Some("retry"));
}

#[test]
fn test_events_filtered_by_event() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let mut sink = InMemoryAuditSink::new(10);
    sink.record(build_audit_event(a, None, "start", None));
    sink.record(build_audit_event(b, None, "skip", None));

    let for_b = sink.events_for(b);
    assert_eq!(for_b.len(), 1);
    assert_eq!(for_b[0].action, "skip");
}

#[test]
fn test_audit_ids_are_unique() {
    let event = Uuid::new_v4();
    let first = build_audit_event(event, None, "start", None);
    let second = build_audit_event(event, None, "start", None);
    assert_ne!(first.audit_id, second.audit_id);
}

#[test]
fn test_zero_capacity_sink_drops_everything() {
    let mut sink = InMemoryAuditSink::new(0);
    sink.record(build_audit_event(Uuid::new_v4(), None, "start", None));
    assert!(sink.events().is_empty());
}
