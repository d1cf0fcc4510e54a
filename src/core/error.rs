//! Error types for admission-control operations.
//!
//! Structural errors (bad configuration, unknown or duplicate identifiers)
//! are returned as values; business-outcome denials travel separately in
//! [`Decision`](crate::core::engine::Decision). Nothing here is fatal.

use thiserror::Error;

/// Errors produced by the pool, ledger, and engine.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// Pool configured with an invalid capacity (e.g. a negative total).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Tenant registration collided with an existing id.
    #[error("duplicate tenant: {0}")]
    DuplicateTenant(String),
    /// Referenced tenant is not registered.
    #[error("unknown tenant: {0}")]
    UnknownTenant(String),
    /// Referenced category is not part of the pool's closed set.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
