//! # Pool Sentry
//!
//! Safe-state admission control for typed resource pools.
//!
//! This library decides whether a request to allocate units of a finite,
//! categorized resource pool (e.g. hotel room types) can be granted to a
//! named tenant without risking starvation of already-committed holders. It
//! adapts the "safe state" check of classical deadlock-avoidance schedulers
//! to a pool of fungible, categorized units.
//!
//! ## Core Problem Solved
//!
//! Granting requests on raw availability alone can leave the pool unable to
//! honor the positions it has already committed to. Pool Sentry evaluates
//! every request in four steps:
//!
//! - **Feasibility**: the demand fits within currently available units
//! - **Speculative apply**: units move tentatively from the pool to the tenant
//! - **Safety verification**: every tenant's outstanding allocation remains
//!   locally solvent against remaining capacity
//! - **Commit or rollback**: the speculative state is kept, or reversed exactly
//!
//! Denials are ordinary values, never faults: a caller always learns *why*
//! (unknown tenant or category, insufficient capacity, unsafe state).
//!
//! ## Usage
//!
//! ```rust
//! use pool_sentry::core::{AdmissionEngine, Decision};
//! use std::collections::HashMap;
//!
//! let totals = HashMap::from([("Single".to_string(), 2), ("Double".to_string(), 1)]);
//! let engine = AdmissionEngine::new(&totals).unwrap();
//! engine.register_tenant("c1", "Ada", "555-0100").unwrap();
//!
//! let demand = HashMap::from([("Single".to_string(), 2)]);
//! assert_eq!(engine.request_allocation("c1", &demand), Decision::Approved);
//! assert_eq!(engine.available_rooms()["Single"], 0);
//! ```
//!
//! ## Concurrency
//!
//! Each `request_allocation` call executes as an indivisible unit behind a
//! mutex scoped to the pool+ledger pair; no partial state is ever visible.
//! On native targets, [`core::gate::AdmissionGate`] offers the alternative
//! single-consumer-queue arrangement: a dedicated worker thread owns the
//! engine and processes one command at a time.
//!
//! For complete examples, see `tests/admission_scenarios_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core admission-control abstractions: pool, ledger, engine, audit, gate.
pub mod core;
/// Configuration models for the engine and audit backends.
pub mod config;
/// Builders to construct engine instances from configuration.
pub mod builders;
/// Shared utilities.
pub mod util;
