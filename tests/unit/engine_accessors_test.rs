//! Tests for the engine's read accessors and audit wiring

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pool_sentry::core::{AdmissionEngine, AdmissionError, AuditEvent, AuditSink, Decision};

fn engine(pairs: &[(&str, i64)]) -> AdmissionEngine {
    let totals: HashMap<String, i64> = pairs.iter().map(|&(c, n)| (c.to_string(), n)).collect();
    AdmissionEngine::new(&totals).unwrap()
}

/// Test sink that shares its buffer with the test body.
struct RecordingSink(Arc<Mutex<Vec<AuditEvent>>>);

impl AuditSink for RecordingSink {
    fn record(&mut self, event: AuditEvent) {
        self.0.lock().unwrap().push(event);
    }
}

#[test]
fn test_tenant_ids_and_profile() {
    let engine = engine(&[("Single", 2)]);
    engine.register_tenant("b", "Bob", "555-0101").unwrap();
    engine.register_tenant("a", "Ada", "555-0100").unwrap();

    assert_eq!(engine.tenant_ids(), vec!["a".to_string(), "b".to_string()]);
    let profile = engine.tenant_profile("a").unwrap();
    assert_eq!(profile.name, "Ada");
    assert_eq!(profile.contact, "555-0100");
    assert_eq!(profile.allocated["Single"], 0);
    assert!(matches!(
        engine.tenant_profile("ghost"),
        Err(AdmissionError::UnknownTenant(_))
    ));
}

#[test]
fn test_category_capacity_accessor() {
    let engine = engine(&[("Single", 2)]);
    let cap = engine.category_capacity("Single").unwrap();
    assert_eq!(cap.total, 2);
    assert_eq!(cap.available, 2);
    assert!(matches!(
        engine.category_capacity("Penthouse"),
        Err(AdmissionError::UnknownCategory(_))
    ));
}

#[test]
fn test_duplicate_registration_rejected() {
    let engine = engine(&[("Single", 2)]);
    engine.register_tenant("a", "Ada", "555-0100").unwrap();
    assert!(matches!(
        engine.register_tenant("a", "Ada", "555-0100"),
        Err(AdmissionError::DuplicateTenant(_))
    ));
}

#[test]
fn test_audit_trail_of_decisions() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let engine = engine(&[("Single", 2)]).with_audit(Box::new(RecordingSink(Arc::clone(&events))));

    engine.register_tenant("a", "Ada", "555-0100").unwrap();
    let demand = HashMap::from([("Single".to_string(), 2)]);
    assert_eq!(engine.request_allocation("a", &demand), Decision::Approved);
    assert!(matches!(
        engine.request_allocation("a", &demand),
        Decision::Denied(_)
    ));

    let events = events.lock().unwrap();
    let actions: Vec<&str> = events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["register", "approve", "deny"]);
    assert!(events[2].detail.as_deref().is_some());
}
