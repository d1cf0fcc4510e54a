//! Admission engine: feasibility, speculative apply, safety verification,
//! commit/rollback.
//!
//! The engine owns the pool and the ledger behind a single
//! `parking_lot::Mutex`, so every admission call observes a consistent
//! snapshot and no partial state (a mutated pool without the matching ledger
//! entry, or vice versa) is ever visible to another call or read accessor.
//! There is no blocking I/O inside the critical section.
//!
//! The safety verification is the simplified, order-independent local
//! solvency check: it confirms that every tenant's *currently granted*
//! allocation could still be satisfied out of capacity, tenant by tenant,
//! accumulating deductions. It deliberately does not search over maximum
//! future claims the way a textbook Banker's algorithm would.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::audit::{build_audit_event, AuditSink};
use crate::core::ledger::{Tenant, TenantLedger};
use crate::core::pool::{CategoryCapacity, ResourcePool};
use crate::core::AdmissionError;
use crate::util::serde::{CapacitySnapshot, CategoryId, Demand};

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// The requesting tenant is not registered.
    UnknownTenant,
    /// The demand referenced a category outside the pool's closed set.
    UnknownCategory(CategoryId),
    /// The feasibility check failed: demand exceeds available units.
    InsufficientCapacity,
    /// The safety verification failed after the speculative apply.
    UnsafeState,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTenant => write!(f, "tenant not found"),
            Self::UnknownCategory(category) => write!(f, "unknown category: {category}"),
            Self::InsufficientCapacity => write!(f, "insufficient available capacity"),
            Self::UnsafeState => write!(f, "would create an unsafe state"),
        }
    }
}

/// Outcome of an admission call. Denials are expected, frequent outcomes in
/// normal operation, never faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The speculative state was committed.
    Approved,
    /// The request was refused; state is exactly as it was before the call.
    Denied(DenialReason),
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Denied(reason) => write!(f, "denied: {reason}"),
        }
    }
}

/// Pool and ledger, guarded together: the admission sequence must not
/// interleave with another call's mutation of the same categories or tenants.
struct EngineState {
    pool: ResourcePool,
    ledger: TenantLedger,
}

/// Resource-admission controller over a typed pool and a tenant ledger.
///
/// An explicit instance owned by the caller; construct once and pass a
/// reference into every request. No process-wide singleton.
pub struct AdmissionEngine {
    state: Mutex<EngineState>,
    audit: Option<Mutex<Box<dyn AuditSink>>>,
}

impl fmt::Debug for AdmissionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionEngine").finish_non_exhaustive()
    }
}

impl AdmissionEngine {
    /// Create an engine over a pool with the given per-category totals.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if any total is negative.
    pub fn new(totals: &HashMap<CategoryId, i64>) -> Result<Self, AdmissionError> {
        let pool = ResourcePool::from_totals(totals)?;
        Ok(Self {
            state: Mutex::new(EngineState {
                pool,
                ledger: TenantLedger::new(),
            }),
            audit: None,
        })
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(Mutex::new(audit));
        self
    }

    /// Register a tenant with zero allocations for every known category.
    ///
    /// # Errors
    ///
    /// `DuplicateTenant` if the id is already registered.
    pub fn register_tenant(
        &self,
        id: &str,
        name: &str,
        contact: &str,
    ) -> Result<(), AdmissionError> {
        {
            let mut state = self.state.lock();
            let EngineState { pool, ledger } = &mut *state;
            ledger.register_tenant(id, name, contact, pool.categories())?;
        } // Lock released before audit
        tracing::info!(tenant = id, "tenant registered");
        self.record_audit(id, "register", None);
        Ok(())
    }

    /// Snapshot of available units per category, for display.
    #[must_use]
    pub fn available_rooms(&self) -> CapacitySnapshot {
        self.state.lock().pool.snapshot()
    }

    /// Render the availability snapshot as one `category: n available` line
    /// per category, sorted by category name.
    #[must_use]
    pub fn format_available_rooms(&self) -> String {
        let snapshot = self.available_rooms();
        let mut lines: Vec<(CategoryId, u32)> = snapshot.into_iter().collect();
        lines.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        lines
            .iter()
            .map(|(category, count)| format!("{category}: {count} available"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Registered tenant ids, sorted.
    #[must_use]
    pub fn tenant_ids(&self) -> Vec<String> {
        self.state.lock().ledger.tenant_ids()
    }

    /// Snapshot of a tenant's profile and allocations.
    ///
    /// # Errors
    ///
    /// `UnknownTenant` if absent.
    pub fn tenant_profile(&self, id: &str) -> Result<Tenant, AdmissionError> {
        self.state.lock().ledger.tenant(id).cloned()
    }

    /// Capacity record (total and available) for one category.
    ///
    /// Strict variant of the pool's zero-defaulting read accessor, for
    /// callers that want to distinguish "empty" from "no such category".
    ///
    /// # Errors
    ///
    /// `UnknownCategory` if the category is not part of the pool.
    pub fn category_capacity(&self, category: &str) -> Result<CategoryCapacity, AdmissionError> {
        let state = self.state.lock();
        if state.pool.contains(category) {
            Ok(CategoryCapacity {
                total: state.pool.total_of(category),
                available: state.pool.available_of(category),
            })
        } else {
            Err(AdmissionError::UnknownCategory(category.to_string()))
        }
    }

    /// Snapshot of a tenant's per-category allocation.
    ///
    /// # Errors
    ///
    /// `UnknownTenant` if absent.
    pub fn tenant_allocation(&self, id: &str) -> Result<CapacitySnapshot, AdmissionError> {
        Ok(self.state.lock().ledger.tenant(id)?.allocated.clone())
    }

    /// Decide a single admission request.
    ///
    /// The whole sequence (resolve tenant, feasibility, speculative apply,
    /// safety verification, commit/rollback) runs under one lock acquisition;
    /// on any denial the pool and ledger are exactly as they were before the
    /// call.
    pub fn request_allocation(&self, tenant_id: &str, demand: &Demand) -> Decision {
        let decision = {
            let mut state = self.state.lock();
            Self::evaluate(&mut state, tenant_id, demand)
        };
        match &decision {
            Decision::Approved => {
                tracing::info!(tenant = tenant_id, "allocation approved");
                self.record_audit(tenant_id, "approve", None);
            }
            Decision::Denied(reason) => {
                tracing::warn!(tenant = tenant_id, %reason, "allocation denied");
                self.record_audit(tenant_id, "deny", Some(reason.to_string()));
            }
        }
        decision
    }

    fn evaluate(state: &mut EngineState, tenant_id: &str, demand: &Demand) -> Decision {
        if !state.ledger.contains(tenant_id) {
            return Decision::Denied(DenialReason::UnknownTenant);
        }

        // Closed category set: freeform keys are refused outright, even at
        // zero quantity.
        for category in demand.keys() {
            if !state.pool.contains(category) {
                return Decision::Denied(DenialReason::UnknownCategory(category.clone()));
            }
        }

        // All-zero demand is always feasible and always safe.
        if demand.values().all(|&qty| qty == 0) {
            tracing::debug!(tenant = tenant_id, "zero demand, no-op approval");
            return Decision::Approved;
        }

        // Fast-path rejection before any speculative work.
        for (category, &qty) in demand {
            if qty > state.pool.available_of(category) {
                return Decision::Denied(DenialReason::InsufficientCapacity);
            }
        }

        // Speculative apply: units move from the available bucket to the
        // tenant's bucket; the pool-wide sum is unchanged.
        for (category, &qty) in demand {
            state.pool.debit(category, qty);
            state.ledger.apply_delta(tenant_id, category, i64::from(qty));
        }
        tracing::debug!(tenant = tenant_id, "speculative apply done");

        if Self::is_safe(&state.pool, &state.ledger, demand) {
            Decision::Approved
        } else {
            // Undo the speculative apply exactly.
            for (category, &qty) in demand {
                state.pool.credit(category, qty);
                state.ledger.apply_delta(tenant_id, category, -i64::from(qty));
            }
            tracing::debug!(tenant = tenant_id, "speculative apply rolled back");
            Decision::Denied(DenialReason::UnsafeState)
        }
    }

    /// Local solvency check over every tenant's recorded allocation.
    ///
    /// The working capacity includes the units the in-flight request is
    /// consuming: they are not committed yet and still count toward covering
    /// outstanding allocations. The outcome is order-independent: with
    /// non-negative allocations the walk fails exactly when a category's
    /// allocation sum exceeds its working capacity.
    fn is_safe(pool: &ResourcePool, ledger: &TenantLedger, in_flight: &Demand) -> bool {
        let mut working = pool.snapshot();
        for (category, &qty) in in_flight {
            if let Some(capacity) = working.get_mut(category) {
                *capacity += qty;
            }
        }
        for tenant in ledger.tenants() {
            for (category, &held) in &tenant.allocated {
                let Some(remaining) = working.get_mut(category) else {
                    return false;
                };
                if held > *remaining {
                    tracing::debug!(
                        tenant = %tenant.id,
                        category = %category,
                        held,
                        remaining = *remaining,
                        "solvency check failed"
                    );
                    return false;
                }
                *remaining -= held;
            }
        }
        true
    }

    fn record_audit(&self, tenant: &str, action: &str, detail: Option<String>) {
        if let Some(sink) = &self.audit {
            sink.lock().record(build_audit_event(tenant, action, detail));
        }
    }
}
