//! Comma-separated text import/export for pattern call repositories.
//!
//! # Responsibility
//! - Parse `id,name,patternFile,called` lines into repository inserts.
//! - Write repository contents back in the same line format.
//!
//! # Invariants
//! - `\n`, `\r\n` and lone `\r` all end a line.
//! - Lines with fewer than four fields are skipped, never reported.
//! - A non-integer id or a called flag other than `true`/`false`
//!   (case-insensitive) aborts the load; earlier inserts are kept.
//! - Ids repeated within one file are skipped before a record is built.
//! - Output uses lowercase `true`/`false` and one `\n`-terminated line per
//!   record, with no header.

use crate::model::pattern_call::{PatternCall, PatternCallId};
use crate::repo::pattern_call_repo::{
    InMemoryPatternCallRepository, PatternCallRepository, RepoError, RepoResult,
};
use log::{error, info};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

const FIELD_SEPARATOR: char = ',';
const FIELD_COUNT: usize = 4;

/// Line counts collected during one file load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records accepted into the repository.
    pub accepted: usize,
    /// Lines with fewer than four fields.
    pub skipped_malformed: usize,
    /// Lines whose id was already seen in this file or already stored.
    pub skipped_duplicate: usize,
}

/// Loads every well-formed line of `path` into `repo`.
///
/// # Errors
/// - `RepoError::Io` when the file cannot be read.
/// - `RepoError::Parse` on the first non-integer id.
/// - `RepoError::InvalidArgument` on the first malformed called flag.
///
/// # Side effects
/// - Records from lines before a failing line remain in `repo`.
/// - Emits `pattern_calls_load` logging events with duration and status.
pub fn load_pattern_calls<R: PatternCallRepository + ?Sized>(
    repo: &mut R,
    path: impl AsRef<Path>,
) -> RepoResult<LoadReport> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=pattern_calls_load module=repo status=start");

    match load_lines(repo, path) {
        Ok(report) => {
            info!(
                "event=pattern_calls_load module=repo status=ok duration_ms={} accepted={} skipped_malformed={} skipped_duplicate={}",
                started_at.elapsed().as_millis(),
                report.accepted,
                report.skipped_malformed,
                report.skipped_duplicate
            );
            Ok(report)
        }
        Err(err) => {
            error!(
                "event=pattern_calls_load module=repo status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(&err),
                err
            );
            Err(err)
        }
    }
}

/// Writes every record of `repo` to `path`, replacing any existing file.
///
/// # Errors
/// - `RepoError::Io` when the file cannot be created, written or flushed.
pub fn save_pattern_calls<R: PatternCallRepository + ?Sized>(
    repo: &R,
    path: impl AsRef<Path>,
) -> RepoResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let calls = repo.get_pattern_calls();
    info!("event=pattern_calls_save module=repo status=start");

    match write_lines(calls, path) {
        Ok(()) => {
            info!(
                "event=pattern_calls_save module=repo status=ok duration_ms={} count={}",
                started_at.elapsed().as_millis(),
                calls.len()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=pattern_calls_save module=repo status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                error_code(&err),
                err
            );
            Err(err)
        }
    }
}

impl InMemoryPatternCallRepository {
    /// Loads pattern calls from a text file. See [`load_pattern_calls`].
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> RepoResult<LoadReport> {
        load_pattern_calls(self, path)
    }

    /// Saves pattern calls to a text file. See [`save_pattern_calls`].
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> RepoResult<()> {
        save_pattern_calls(self, path)
    }
}

/// Renders one record as a file line, without the trailing newline.
pub fn format_line(call: &PatternCall) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}",
        call.id(),
        call.name(),
        call.pattern_file(),
        call.is_called(),
        sep = FIELD_SEPARATOR
    )
}

fn load_lines<R: PatternCallRepository + ?Sized>(
    repo: &mut R,
    path: &Path,
) -> RepoResult<LoadReport> {
    let contents = std::fs::read_to_string(path).map_err(|err| RepoError::io(path, err))?;
    let mut seen_ids: HashSet<PatternCallId> = HashSet::new();
    let mut report = LoadReport::default();

    for (index, line) in split_lines(&contents).enumerate() {
        let Some([id, name, pattern_file, called]) = split_fields(line) else {
            report.skipped_malformed += 1;
            continue;
        };

        let id = parse_id(id, index + 1)?;
        let called = parse_called(called)?;

        if !seen_ids.insert(id) {
            report.skipped_duplicate += 1;
            continue;
        }

        let before = repo.get_pattern_calls().len();
        repo.add_pattern_call(PatternCall::new(id, name, pattern_file, called));
        if repo.get_pattern_calls().len() > before {
            report.accepted += 1;
        } else {
            report.skipped_duplicate += 1;
        }
    }

    Ok(report)
}

fn write_lines(calls: &[PatternCall], path: &Path) -> RepoResult<()> {
    let file = File::create(path).map_err(|err| RepoError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    for call in calls {
        writeln!(writer, "{}", format_line(call)).map_err(|err| RepoError::io(path, err))?;
    }
    writer.flush().map_err(|err| RepoError::io(path, err))
}

/// Splits file contents on `\n`, `\r\n` and lone `\r` line breaks.
///
/// A final line break does not start an extra empty line.
fn split_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .split_terminator('\n')
        .flat_map(|piece| piece.strip_suffix('\r').unwrap_or(piece).split('\r'))
}

/// Strips leading and trailing spaces and ASCII control characters.
fn trim_field(field: &str) -> &str {
    field.trim_matches(|c: char| c <= ' ')
}

/// Splits a line into its first four trimmed fields.
///
/// Trailing empty fields are dropped before counting, so `1,a,b,` has only
/// three fields. Fields past the fourth are ignored.
fn split_fields(line: &str) -> Option<[&str; FIELD_COUNT]> {
    let mut parts: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    if parts.len() < FIELD_COUNT {
        return None;
    }
    Some([
        trim_field(parts[0]),
        trim_field(parts[1]),
        trim_field(parts[2]),
        trim_field(parts[3]),
    ])
}

fn parse_id(value: &str, line: usize) -> RepoResult<PatternCallId> {
    value.parse().map_err(|source| RepoError::Parse {
        line,
        value: value.to_string(),
        source,
    })
}

fn parse_called(value: &str) -> RepoResult<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(RepoError::InvalidArgument(format!(
            "invalid boolean value: {value}"
        )))
    }
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::InvalidArgument(_) => "invalid_argument",
        RepoError::Parse { .. } => "parse_failed",
        RepoError::Io { .. } => "io_failed",
    }
}

#[cfg(test)]
mod tests {
    use super::{format_line, parse_called, parse_id, split_fields, split_lines, trim_field};
    use crate::model::pattern_call::PatternCall;
    use crate::repo::pattern_call_repo::RepoError;

    #[test]
    fn split_fields_trims_and_ignores_extra_columns() {
        assert_eq!(
            split_fields(" 7 , name ,path.pat, TRUE ,extra"),
            Some(["7", "name", "path.pat", "TRUE"])
        );
    }

    #[test]
    fn split_fields_drops_trailing_empty_fields_before_counting() {
        assert_eq!(split_fields("1,a,b,"), None);
        assert_eq!(split_fields("1,a,b,true,,"), Some(["1", "a", "b", "true"]));
        assert_eq!(split_fields(""), None);
        assert_eq!(split_fields("Invalid,Data,Format"), None);
    }

    #[test]
    fn split_lines_accepts_every_line_break_style() {
        let lines: Vec<&str> = split_lines("a\nb\r\nc\rd\r").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn split_lines_keeps_blank_lines_between_breaks() {
        let lines: Vec<&str> = split_lines("a\r\r\n\nb").collect();
        assert_eq!(lines, vec!["a", "", "", "b"]);
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn trim_field_strips_control_characters_but_not_unicode_spaces() {
        assert_eq!(trim_field("\0\t name \x1f"), "name");
        assert_eq!(trim_field("\u{a0}name\u{3000}"), "\u{a0}name\u{3000}");
    }

    #[test]
    fn split_fields_keeps_inner_empty_fields() {
        assert_eq!(split_fields("1,,,false"), Some(["1", "", "", "false"]));
    }

    #[test]
    fn parse_called_is_case_insensitive() {
        assert!(parse_called("TrUe").unwrap());
        assert!(!parse_called("FALSE").unwrap());
    }

    #[test]
    fn parse_called_names_the_rejected_value() {
        let err = parse_called("yes").unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument(ref msg) if msg.contains("yes")));
    }

    #[test]
    fn parse_id_reports_line_and_value() {
        let err = parse_id("abc", 3).unwrap_err();
        match err {
            RepoError::Parse { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn format_line_uses_lowercase_flag() {
        let call = PatternCall::new(-1, "n", "p", true);
        assert_eq!(format_line(&call), "-1,n,p,true");
    }
}
