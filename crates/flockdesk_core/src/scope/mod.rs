//! Owner-only tenant scope selection.
//!
//! # Responsibility
//! - Offer tenant choices to Owner-tier actors and nobody else.
//! - Hold the current scope and the reference maps built for it.
//!
//! # Invariants
//! - Non-Owner actors get no options and cannot select a scope.
//! - Each selection invalidates older reference rebuilds (last write wins).
//! - Reference maps are swapped whole; consumers hold immutable snapshots.

pub mod selector;
