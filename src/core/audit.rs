//! Audit sink implementations.
//!
//! Every state change flows through the engine, so a single sink attached
//! there sees the full admission history. Provides an in-memory sink and a
//! Postgres schema definition for external persistence.

use std::collections::VecDeque;

use crate::util::clock::now_ms;

/// One recorded admission event.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    /// Unique event identifier.
    pub event_id: String,
    /// Tenant the event concerns.
    pub tenant: String,
    /// Action taken (register, approve, deny).
    pub action: String,
    /// Additional context, e.g. the denial reason.
    pub detail: Option<String>,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Postgres-backed audit sink (schema-only; DB I/O not wired).
pub struct PostgresAuditSink;

impl PostgresAuditSink {
    /// Returns SQL migration statements for the admission audit log.
    #[must_use]
    pub fn migrations() -> &'static [&'static str] {
        &[r"
CREATE TABLE IF NOT EXISTS admission_audit_events (
    event_id TEXT PRIMARY KEY,
    tenant TEXT NOT NULL,
    action TEXT NOT NULL,
    detail TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_admission_audit_tenant_created ON admission_audit_events (tenant, created_at);
CREATE INDEX IF NOT EXISTS idx_admission_audit_action ON admission_audit_events (action);
"]
    }
}

impl AuditSink for PostgresAuditSink {
    fn record(&mut self, _event: AuditEvent) {
        // Stub: actual DB writes require a runtime + client; left to integration layer.
    }
}

/// Helper to build an audit event with a fresh id and timestamp.
pub fn build_audit_event(
    tenant: impl Into<String>,
    action: impl Into<String>,
    detail: Option<String>,
) -> AuditEvent {
    AuditEvent {
        event_id: uuid::Uuid::new_v4().to_string(),
        tenant: tenant.into(),
        action: action.into(),
        detail,
        created_at_ms: now_ms(),
    }
}
