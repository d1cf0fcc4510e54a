//! Engine configuration structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Audit backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditBackendConfig {
    /// No audit trail.
    Disabled,
    /// Bounded in-memory audit log for development/testing.
    InMemory,
    /// Postgres audit log (schema-only sink).
    Postgres,
}

/// Admission engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Total units per category. The category set is fixed at initialization.
    pub categories: HashMap<String, i64>,
    /// Audit backend selection.
    #[serde(default = "default_audit_backend")]
    pub audit: AuditBackendConfig,
    /// Event buffer bound for the in-memory audit backend.
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,
}

fn default_audit_backend() -> AuditBackendConfig {
    AuditBackendConfig::Disabled
}

const fn default_audit_capacity() -> usize {
    1024
}

impl EngineConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// A human-readable message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.categories.is_empty() {
            return Err("at least one category must be defined".into());
        }
        for (category, &total) in &self.categories {
            if total < 0 {
                return Err(format!("category `{category}` has negative total {total}"));
            }
        }
        if matches!(self.audit, AuditBackendConfig::InMemory) && self.audit_capacity == 0 {
            return Err("audit_capacity must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse engine configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// A parse or validation message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
