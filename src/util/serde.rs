//! Shared serializable types used across the engine and its callers.

use std::collections::HashMap;

/// Identifier of a tenant (the entity holding allocated units).
pub type TenantId = String;

/// Identifier of a resource category (e.g. a room type).
pub type CategoryId = String;

/// Quantity requested per category in a single admission call.
///
/// Categories absent from the map are treated as zero demand.
pub type Demand = HashMap<CategoryId, u32>;

/// Snapshot of per-category counts, suitable for display by the caller.
pub type CapacitySnapshot = HashMap<CategoryId, u32>;
