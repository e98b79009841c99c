//! Domain model for pattern call records.
//!
//! # Responsibility
//! - Define the immutable record shape shared by repository, codec and
//!   query layers.
//!
//! # Invariants
//! - Records carry no self-validation; constraints are enforced only when a
//!   record is inserted into a repository.

pub mod pattern_call;
