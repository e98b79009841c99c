//! Pattern call domain model.
//!
//! # Responsibility
//! - Define the four-field record tracked by pattern call repositories.
//! - Provide a stable human-readable rendering for CLI output.
//!
//! # Invariants
//! - A `PatternCall` is never mutated after construction.
//! - `id` is caller-supplied; sign and uniqueness are not checked here.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a pattern call.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PatternCallId = i32;

/// One recorded invocation of a pattern definition file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternCall {
    id: PatternCallId,
    name: String,
    pattern_file: String,
    called: bool,
}

impl PatternCall {
    /// Creates a new pattern call record.
    ///
    /// Empty `name` and `pattern_file` values are accepted as-is.
    pub fn new(
        id: PatternCallId,
        name: impl Into<String>,
        pattern_file: impl Into<String>,
        called: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            pattern_file: pattern_file.into(),
            called,
        }
    }

    pub fn id(&self) -> PatternCallId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the pattern file this call refers to.
    pub fn pattern_file(&self) -> &str {
        &self.pattern_file
    }

    /// Returns whether the pattern was actually called (vs. skipped).
    pub fn is_called(&self) -> bool {
        self.called
    }
}

impl Display for PatternCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PatternCall{{id={}, name='{}', patternFile='{}', called={}}}",
            self.id, self.name, self.pattern_file, self.called
        )
    }
}
