//! Identity context over externally-owned session state.
//!
//! # Responsibility
//! - Resolve the current `Actor` from session keys at the composition
//!   boundary.
//! - Write and clear the same keys on login/logout.
//!
//! # Invariants
//! - This is the only module that reads session state; every other core
//!   function receives an explicit `Actor`.
//! - Missing or unrecognized identity is an error, never an empty actor.

pub mod identity;
