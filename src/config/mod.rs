//! Configuration models for the engine and its audit backend.

pub mod engine;

pub use engine::{AuditBackendConfig, EngineConfig};
