//! Console use-case services.
//!
//! # Responsibility
//! - Compose identity, visibility, reference and search into list use-cases.
//! - Keep UI callers decoupled from filter ordering and scope bookkeeping.
//!
//! # Invariants
//! - Every list is re-fetched, visibility-filtered, then searched, in that
//!   order; no list is patched incrementally after a mutation.

pub mod console;
pub mod navigation;
