//! Core admission-control components: pool, ledger, engine, audit.

pub mod error;
pub mod pool;
pub mod ledger;
pub mod engine;
pub mod audit;
#[cfg(not(target_arch = "wasm32"))]
pub mod gate;

pub use error::{AdmissionError, AppResult};
pub use pool::{CategoryCapacity, ResourcePool};
pub use ledger::{Tenant, TenantLedger};
pub use engine::{AdmissionEngine, Decision, DenialReason};
pub use audit::{build_audit_event, AuditEvent, AuditSink, InMemoryAuditSink, PostgresAuditSink};
#[cfg(not(target_arch = "wasm32"))]
pub use gate::{AdmissionGate, GateError};
