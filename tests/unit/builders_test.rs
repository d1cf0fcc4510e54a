//! Tests for engine construction from configuration

use std::collections::HashMap;

use pool_sentry::builders::build_engine;
use pool_sentry::config::{AuditBackendConfig, EngineConfig};
use pool_sentry::core::{AdmissionError, Decision};

fn config(pairs: &[(&str, i64)], audit: AuditBackendConfig) -> EngineConfig {
    EngineConfig {
        categories: pairs.iter().map(|&(c, n)| (c.to_string(), n)).collect(),
        audit,
        audit_capacity: 64,
    }
}

#[test]
fn test_build_engine_from_valid_config() {
    let engine = build_engine(&config(
        &[("Single", 2), ("Double", 1)],
        AuditBackendConfig::Disabled,
    ))
    .unwrap();
    assert_eq!(engine.available_rooms()["Single"], 2);
}

#[test]
fn test_build_engine_rejects_invalid_config() {
    let err = build_engine(&config(&[], AuditBackendConfig::Disabled)).unwrap_err();
    assert!(matches!(err, AdmissionError::InvalidConfiguration(_)));
}

#[test]
fn test_build_engine_with_audit_backends() {
    for audit in [AuditBackendConfig::InMemory, AuditBackendConfig::Postgres] {
        let engine = build_engine(&config(&[("Single", 1)], audit)).unwrap();
        engine.register_tenant("a", "Ada", "555-0100").unwrap();
        let demand = HashMap::from([("Single".to_string(), 1)]);
        assert_eq!(engine.request_allocation("a", &demand), Decision::Approved);
    }
}
