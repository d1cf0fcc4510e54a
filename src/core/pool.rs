//! Resource pool: per-category capacity accounting.
//!
//! The category set is closed at construction (no freeform keys at request
//! time). `available` starts equal to `total` and changes only through the
//! admission engine's speculative-apply and rollback paths, keeping mutation
//! centralized and auditable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::AdmissionError;
use crate::util::serde::{CapacitySnapshot, CategoryId};

/// Capacity record for a single category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCapacity {
    /// Units the pool was created with. Fixed for the pool's lifetime.
    pub total: u32,
    /// Units not currently held by any tenant.
    pub available: u32,
}

/// A pool of categorized, fungible resource units.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    capacities: HashMap<CategoryId, CategoryCapacity>,
}

impl ResourcePool {
    /// Create a pool from per-category totals, with `available` initialized
    /// equal to `total`.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if any total is negative.
    pub fn from_totals(totals: &HashMap<CategoryId, i64>) -> Result<Self, AdmissionError> {
        let mut capacities = HashMap::with_capacity(totals.len());
        for (category, &total) in totals {
            let total = u32::try_from(total).map_err(|_| {
                AdmissionError::InvalidConfiguration(format!(
                    "category `{category}` has invalid total {total}"
                ))
            })?;
            capacities.insert(
                category.clone(),
                CategoryCapacity {
                    total,
                    available: total,
                },
            );
        }
        Ok(Self { capacities })
    }

    /// Whether `category` belongs to the pool's closed category set.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.capacities.contains_key(category)
    }

    /// Available units for `category`; 0 for an unknown category.
    #[must_use]
    pub fn available_of(&self, category: &str) -> u32 {
        self.capacities.get(category).map_or(0, |c| c.available)
    }

    /// Total units for `category`; 0 for an unknown category.
    #[must_use]
    pub fn total_of(&self, category: &str) -> u32 {
        self.capacities.get(category).map_or(0, |c| c.total)
    }

    /// Iterate over the known category identifiers.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryId> {
        self.capacities.keys()
    }

    /// Snapshot of available units per category, for display.
    #[must_use]
    pub fn snapshot(&self) -> CapacitySnapshot {
        self.capacities
            .iter()
            .map(|(category, cap)| (category.clone(), cap.available))
            .collect()
    }

    /// Remove `qty` units from `category`'s available count.
    ///
    /// Callers must have established `qty <= available` (the feasibility
    /// check); the subtraction saturates so `available` can never leave
    /// `[0, total]`.
    pub(crate) fn debit(&mut self, category: &str, qty: u32) {
        if let Some(cap) = self.capacities.get_mut(category) {
            debug_assert!(qty <= cap.available, "debit exceeds available units");
            cap.available = cap.available.saturating_sub(qty);
        }
    }

    /// Return `qty` units to `category`'s available count (rollback path).
    pub(crate) fn credit(&mut self, category: &str, qty: u32) {
        if let Some(cap) = self.capacities.get_mut(category) {
            let restored = cap.available.saturating_add(qty);
            debug_assert!(restored <= cap.total, "credit exceeds total units");
            cap.available = restored.min(cap.total);
        }
    }
}
