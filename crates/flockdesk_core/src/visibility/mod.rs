//! Record visibility gate.
//!
//! # Responsibility
//! - Decide, per record, whether an actor may see it.
//! - Narrow whole collections with a stable, idempotent filter.
//!
//! # Invariants
//! - Leader: authored records only; Admin: own tenant only; Owner: selected
//!   scope only, nothing without a scope.
//! - Malformed records are excluded and logged, never surfaced as failures.
//! - Every error path is fail-closed.

pub mod filter;
pub mod record;
