//! Tenant ledger: who holds what.
//!
//! Maps tenant identifiers to tenant metadata and per-category allocations.
//! Allocations are mutated only by the admission engine's commit and rollback
//! paths; callers outside the crate get read access and snapshots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::AdmissionError;
use crate::util::serde::{CategoryId, TenantId};

/// A named entity that can hold allocated units and submit demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: TenantId,
    /// Display name.
    pub name: String,
    /// Contact string (phone number, email, ...).
    pub contact: String,
    /// Units currently held, per category. Never negative.
    pub allocated: HashMap<CategoryId, u32>,
}

/// Registry of tenants and their outstanding allocations.
#[derive(Debug, Clone, Default)]
pub struct TenantLedger {
    tenants: HashMap<TenantId, Tenant>,
}

impl TenantLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tenant with a zero allocation row for every known category.
    ///
    /// # Errors
    ///
    /// `DuplicateTenant` if `id` is already registered.
    pub fn register_tenant<'a>(
        &mut self,
        id: &str,
        name: &str,
        contact: &str,
        categories: impl Iterator<Item = &'a CategoryId>,
    ) -> Result<(), AdmissionError> {
        if self.tenants.contains_key(id) {
            return Err(AdmissionError::DuplicateTenant(id.to_string()));
        }
        let allocated = categories.map(|c| (c.clone(), 0)).collect();
        self.tenants.insert(
            id.to_string(),
            Tenant {
                id: id.to_string(),
                name: name.to_string(),
                contact: contact.to_string(),
                allocated,
            },
        );
        Ok(())
    }

    /// Look up a tenant by id.
    ///
    /// # Errors
    ///
    /// `UnknownTenant` if absent.
    pub fn tenant(&self, id: &str) -> Result<&Tenant, AdmissionError> {
        self.tenants
            .get(id)
            .ok_or_else(|| AdmissionError::UnknownTenant(id.to_string()))
    }

    /// Whether a tenant with `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tenants.contains_key(id)
    }

    /// Registered tenant ids, sorted for stable display.
    #[must_use]
    pub fn tenant_ids(&self) -> Vec<TenantId> {
        let mut ids: Vec<TenantId> = self.tenants.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over all registered tenants.
    pub fn tenants(&self) -> impl Iterator<Item = &Tenant> {
        self.tenants.values()
    }

    /// Number of registered tenants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    /// Whether the ledger holds no tenants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    /// Add `delta` (positive on commit, negative on rollback) to a tenant's
    /// allocation for `category`.
    ///
    /// Engine-internal: callers must have resolved the tenant and category,
    /// and a negative delta never exceeds what the engine just applied. The
    /// result is clamped to keep allocations non-negative.
    pub(crate) fn apply_delta(&mut self, id: &str, category: &str, delta: i64) {
        let Some(tenant) = self.tenants.get_mut(id) else {
            debug_assert!(false, "apply_delta on unregistered tenant");
            return;
        };
        let entry = tenant.allocated.entry(category.to_string()).or_insert(0);
        let next = i64::from(*entry) + delta;
        debug_assert!(next >= 0, "allocation would go negative");
        *entry = u32::try_from(next.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);
    }
}
