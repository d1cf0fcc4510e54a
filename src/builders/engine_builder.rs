//! Builders to construct a configured admission engine.

use crate::config::{AuditBackendConfig, EngineConfig};
use crate::core::{AdmissionEngine, AdmissionError, InMemoryAuditSink, PostgresAuditSink};

/// Build an admission engine from configuration, attaching the configured
/// audit sink.
///
/// # Errors
///
/// `InvalidConfiguration` if validation fails.
pub fn build_engine(cfg: &EngineConfig) -> Result<AdmissionEngine, AdmissionError> {
    cfg.validate().map_err(AdmissionError::InvalidConfiguration)?;

    let engine = AdmissionEngine::new(&cfg.categories)?;
    Ok(match cfg.audit {
        AuditBackendConfig::Disabled => engine,
        AuditBackendConfig::InMemory => {
            engine.with_audit(Box::new(InMemoryAuditSink::new(cfg.audit_capacity)))
        }
        AuditBackendConfig::Postgres => engine.with_audit(Box::new(PostgresAuditSink)),
    })
}
