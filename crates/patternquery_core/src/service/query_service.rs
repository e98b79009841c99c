//! Pattern call query service.
//!
//! # Responsibility
//! - Provide stable lookup entry points for core callers.
//! - Derive called/skipped views from the ordered record list.
//!
//! # Invariants
//! - The service holds no state of its own beyond the repository.
//! - Derived views preserve repository insertion order.

use crate::model::pattern_call::{PatternCall, PatternCallId};
use crate::repo::pattern_call_repo::PatternCallRepository;

/// Read-only query wrapper around a pattern call repository.
pub struct PatternCallQueryService<R: PatternCallRepository> {
    repo: R,
}

impl<R: PatternCallRepository> PatternCallQueryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Releases the wrapped repository.
    pub fn into_repository(self) -> R {
        self.repo
    }

    pub fn get_pattern_call_by_id(&self, id: PatternCallId) -> Option<&PatternCall> {
        self.repo.get_pattern_call_by_id(id)
    }

    pub fn get_pattern_calls_by_name(&self, name: &str) -> Vec<&PatternCall> {
        self.repo.get_pattern_calls_by_name(name)
    }

    pub fn get_pattern_calls_by_path(&self, pattern_file: &str) -> Vec<&PatternCall> {
        self.repo.get_pattern_calls_by_path(pattern_file)
    }

    /// Lists calls whose pattern was not called.
    pub fn get_skipped_pattern_calls(&self) -> Vec<&PatternCall> {
        self.filter_called(false)
    }

    /// Lists calls whose pattern was called.
    pub fn get_called_pattern_calls(&self) -> Vec<&PatternCall> {
        self.filter_called(true)
    }

    fn filter_called(&self, called: bool) -> Vec<&PatternCall> {
        self.repo
            .get_pattern_calls()
            .iter()
            .filter(|call| call.is_called() == called)
            .collect()
    }
}
