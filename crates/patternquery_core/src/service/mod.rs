//! Core use-case services.
//!
//! # Responsibility
//! - Expose read-only query entry points over repository implementations.
//! - Keep CLI callers decoupled from storage details.

pub mod query_service;
