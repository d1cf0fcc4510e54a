//! Tests for error types

use pool_sentry::core::AdmissionError;

#[test]
fn test_invalid_configuration_error() {
    let err = AdmissionError::InvalidConfiguration("negative total".to_string());
    assert_eq!(format!("{err}"), "invalid configuration: negative total");
}

#[test]
fn test_duplicate_tenant_error() {
    let err = AdmissionError::DuplicateTenant("c1".to_string());
    assert_eq!(format!("{err}"), "duplicate tenant: c1");
}

#[test]
fn test_unknown_tenant_error() {
    let err = AdmissionError::UnknownTenant("ghost".to_string());
    assert_eq!(format!("{err}"), "unknown tenant: ghost");
}

#[test]
fn test_unknown_category_error() {
    let err = AdmissionError::UnknownCategory("Penthouse".to_string());
    assert_eq!(format!("{err}"), "unknown category: Penthouse");
}
