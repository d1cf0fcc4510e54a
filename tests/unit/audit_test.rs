//! Tests for audit sinks

use pool_sentry::core::{build_audit_event, AuditSink, InMemoryAuditSink, PostgresAuditSink};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event("tenant1", "approve", None);
    let id = event.event_id.clone();
    sink.record(event);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id, id);
    assert_eq!(events[0].tenant, "tenant1");
    assert_eq!(events[0].action, "approve");
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event("t1", "register", None));
    sink.record(build_audit_event("t2", "register", None));
    sink.record(build_audit_event("t3", "register", None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].tenant, "t2"); // First one popped
    assert_eq!(events[1].tenant, "t3");
}

#[test]
fn test_build_audit_event() {
    let event = build_audit_event("t1", "deny", Some("insufficient available capacity".into()));

    assert!(!event.event_id.is_empty());
    assert_eq!(event.tenant, "t1");
    assert_eq!(event.action, "deny");
    assert_eq!(
        event.detail,
        Some("insufficient available capacity".to_string())
    );
    assert!(event.created_at_ms > 0);
}

#[test]
fn test_event_ids_are_unique() {
    let a = build_audit_event("t1", "approve", None);
    let b = build_audit_event("t1", "approve", None);
    assert_ne!(a.event_id, b.event_id);
}

#[test]
fn test_postgres_sink_migrations_present() {
    let migrations = PostgresAuditSink::migrations();
    assert!(!migrations.is_empty());
    assert!(migrations[0].contains("admission_audit_events"));
}
