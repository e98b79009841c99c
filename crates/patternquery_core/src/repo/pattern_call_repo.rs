//! Pattern call repository contract and indexed in-memory implementation.
//!
//! # Responsibility
//! - Store accepted pattern calls in insertion order.
//! - Maintain id, name and path lookups over the same records.
//!
//! # Invariants
//! - Every accepted record appears once in the ordered list, once in the id
//!   index and in exactly the name/path groups matching its own fields.
//! - The first record stored for an id wins; later records with that id are
//!   discarded without error.
//! - Indexes are private and only updated by `add_pattern_call`.

use crate::model::pattern_call::{PatternCall, PatternCallId};
use log::debug;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for pattern call insertion and file import/export.
#[derive(Debug)]
pub enum RepoError {
    /// Missing record, or a field value that cannot be interpreted.
    InvalidArgument(String),
    /// Identifier field is not a valid integer.
    Parse {
        line: usize,
        value: String,
        source: ParseIntError,
    },
    /// Backing file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RepoError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "{message}"),
            Self::Parse { line, value, source } => {
                write!(f, "invalid pattern call id `{value}` on line {line}: {source}")
            }
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Parse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Repository interface for pattern call storage and lookup.
pub trait PatternCallRepository {
    /// Stores `call` unless its id is already present.
    fn add_pattern_call(&mut self, call: PatternCall);
    fn get_pattern_call_by_id(&self, id: PatternCallId) -> Option<&PatternCall>;
    /// Returns calls with exactly this name, in insertion order.
    fn get_pattern_calls_by_name(&self, name: &str) -> Vec<&PatternCall>;
    /// Returns calls with exactly this pattern file, in insertion order.
    fn get_pattern_calls_by_path(&self, pattern_file: &str) -> Vec<&PatternCall>;
    /// Returns every stored call in insertion order.
    fn get_pattern_calls(&self) -> &[PatternCall];

    /// Stores an optional record, rejecting `None` as an invalid argument.
    ///
    /// Entry point for callers whose record may be missing; duplicates are
    /// still dropped silently.
    fn try_add_pattern_call(&mut self, call: Option<PatternCall>) -> RepoResult<()> {
        let call = call.ok_or_else(|| {
            RepoError::InvalidArgument("pattern call cannot be empty".to_string())
        })?;
        self.add_pattern_call(call);
        Ok(())
    }
}

/// Pattern call repository backed by a dense record list.
///
/// Lookup maps hold positions into `calls` rather than record copies.
#[derive(Debug, Default)]
pub struct InMemoryPatternCallRepository {
    calls: Vec<PatternCall>,
    by_id: HashMap<PatternCallId, usize>,
    by_name: HashMap<String, Vec<usize>>,
    by_path: HashMap<String, Vec<usize>>,
}

impl InMemoryPatternCallRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn contains_id(&self, id: PatternCallId) -> bool {
        self.by_id.contains_key(&id)
    }

    fn resolve(&self, positions: Option<&Vec<usize>>) -> Vec<&PatternCall> {
        positions
            .map(|positions| positions.iter().map(|&pos| &self.calls[pos]).collect())
            .unwrap_or_default()
    }
}

impl PatternCallRepository for InMemoryPatternCallRepository {
    fn add_pattern_call(&mut self, call: PatternCall) {
        if self.by_id.contains_key(&call.id()) {
            debug!(
                "event=pattern_call_add module=repo status=skipped reason=duplicate_id id={}",
                call.id()
            );
            return;
        }

        let pos = self.calls.len();
        self.by_id.insert(call.id(), pos);
        self.by_name
            .entry(call.name().to_string())
            .or_default()
            .push(pos);
        self.by_path
            .entry(call.pattern_file().to_string())
            .or_default()
            .push(pos);
        self.calls.push(call);
    }

    fn get_pattern_call_by_id(&self, id: PatternCallId) -> Option<&PatternCall> {
        self.by_id.get(&id).map(|&pos| &self.calls[pos])
    }

    fn get_pattern_calls_by_name(&self, name: &str) -> Vec<&PatternCall> {
        self.resolve(self.by_name.get(name))
    }

    fn get_pattern_calls_by_path(&self, pattern_file: &str) -> Vec<&PatternCall> {
        self.resolve(self.by_path.get(pattern_file))
    }

    fn get_pattern_calls(&self) -> &[PatternCall] {
        &self.calls
    }
}
