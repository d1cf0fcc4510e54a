//! Tests for configuration validation

use std::collections::HashMap;

use pool_sentry::config::{AuditBackendConfig, EngineConfig};

fn categories(pairs: &[(&str, i64)]) -> HashMap<String, i64> {
    pairs.iter().map(|&(c, n)| (c.to_string(), n)).collect()
}

#[test]
fn test_engine_config_validation() {
    let valid = EngineConfig {
        categories: categories(&[("Single", 2), ("Double", 1)]),
        audit: AuditBackendConfig::Disabled,
        audit_capacity: 1024,
    };
    assert!(valid.validate().is_ok());
}

#[test]
fn test_engine_config_empty_categories() {
    let invalid = EngineConfig {
        categories: HashMap::new(),
        audit: AuditBackendConfig::Disabled,
        audit_capacity: 1024,
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_engine_config_negative_total() {
    let invalid = EngineConfig {
        categories: categories(&[("Single", -3)]),
        audit: AuditBackendConfig::Disabled,
        audit_capacity: 1024,
    };
    let err = invalid.validate().unwrap_err();
    assert!(err.contains("Single"));
}

#[test]
fn test_engine_config_zero_audit_capacity() {
    let invalid = EngineConfig {
        categories: categories(&[("Single", 2)]),
        audit: AuditBackendConfig::InMemory,
        audit_capacity: 0,
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_engine_config_from_json() {
    let json = r#"{
        "categories": { "Single": 2, "Double": 1 },
        "audit": "in_memory",
        "audit_capacity": 64
    }"#;

    let config = EngineConfig::from_json_str(json).unwrap();
    assert_eq!(config.categories["Single"], 2);
    assert!(matches!(config.audit, AuditBackendConfig::InMemory));
    assert_eq!(config.audit_capacity, 64);
}

#[test]
fn test_engine_config_json_defaults() {
    let json = r#"{ "categories": { "Single": 2 } }"#;
    let config = EngineConfig::from_json_str(json).unwrap();
    assert!(matches!(config.audit, AuditBackendConfig::Disabled));
    assert_eq!(config.audit_capacity, 1024);
}

#[test]
fn test_engine_config_json_negative_total_rejected() {
    let json = r#"{ "categories": { "Single": -1 } }"#;
    assert!(EngineConfig::from_json_str(json).is_err());
}
