//! Repository layer: indexed in-memory storage and flat-file persistence.
//!
//! # Responsibility
//! - Define the pattern call storage contract used by query services.
//! - Keep the primary record list and its derived indexes consistent.
//! - Own the comma-separated text format used for import/export.
//!
//! # Invariants
//! - Identifier uniqueness is the only constraint enforced on insert.
//! - Duplicate identifiers are dropped silently, never reported as errors.

pub mod flat_file;
pub mod pattern_call_repo;
