//! Reference resolution from foreign-key ids to labels.
//!
//! # Responsibility
//! - Build per-tenant id→label tables for people and tasks.
//! - Provide the deterministic fallback label for unresolved ids.
//!
//! # Invariants
//! - Maps are immutable snapshots, rebuilt (never patched) per tenant scope.
//! - A map only ever holds entries of the tenant it was built for.
//! - Lookups never fail; fetch failures degrade to empty maps.

pub mod resolver;
