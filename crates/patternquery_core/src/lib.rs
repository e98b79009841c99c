//! Indexed in-memory store for pattern call records.
//! Records are kept in insertion order with id, name and path lookups, and
//! can be imported from / exported to a comma-separated text file.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::pattern_call::{PatternCall, PatternCallId};
pub use repo::flat_file::{format_line, load_pattern_calls, save_pattern_calls, LoadReport};
pub use repo::pattern_call_repo::{
    InMemoryPatternCallRepository, PatternCallRepository, RepoError, RepoResult,
};
pub use service::query_service::PatternCallQueryService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
