//! Free-text search over visible records.
//!
//! # Responsibility
//! - Normalize user query text once per search.
//! - Match records on their own text fields and on resolved reference labels.
//!
//! # Invariants
//! - Search only narrows; an empty query matches every record.
//! - Raw ids and unresolved-id placeholders are never searchable text.

pub mod matcher;
