// GuildView - app/loader.rs
//
// Load orchestration: read a guild list from disk, parse it, and produce
// the records plus a summary for the Load Summary window.
// Runs synchronously on the UI thread; files are small line lists.

use crate::core::model::{GuildRecord, MemberCountPolicy, RejectedLine};
use crate::core::parser;
use crate::platform::fs::read_input_file;
use crate::util::constants::MAX_RETAINED_REJECTS;
use crate::util::error::Result;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Statistics about the most recent successful load.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    /// File the records were read from.
    pub path: PathBuf,

    /// Records parsed.
    pub record_count: usize,

    /// Total lines read, including rejected ones.
    pub lines_processed: usize,

    /// Total number of rejected lines.
    pub rejected_count: usize,

    /// The first `MAX_RETAINED_REJECTS` rejected lines, in input order.
    pub rejected: Vec<RejectedLine>,

    /// Wall-clock time the load finished.
    pub loaded_at: DateTime<Local>,

    /// Read + parse duration.
    pub duration: Duration,
}

/// Records and summary of a successful load.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: Vec<GuildRecord>,
    pub summary: LoadSummary,
}

/// Read and parse the guild list at `path`.
///
/// Fails with `LoadError` when the file cannot be read or decoded and with
/// `ParseFieldError` when `policy` is `Abort` and a member count is invalid.
pub fn load_file(path: &Path, policy: MemberCountPolicy) -> Result<LoadOutcome> {
    let started = Instant::now();
    tracing::info!(path = %path.display(), ?policy, "Loading guild list");

    let content = read_input_file(path)?;
    let result = parser::parse_content(&content, policy)?;

    let rejected_count = result.rejected.len();
    let mut rejected = result.rejected;
    rejected.truncate(MAX_RETAINED_REJECTS);

    let summary = LoadSummary {
        path: path.to_path_buf(),
        record_count: result.records.len(),
        lines_processed: result.lines_processed,
        rejected_count,
        rejected,
        loaded_at: Local::now(),
        duration: started.elapsed(),
    };

    tracing::info!(
        path = %path.display(),
        records = summary.record_count,
        rejected = summary.rejected_count,
        elapsed_ms = summary.duration.as_millis() as u64,
        "Guild list loaded"
    );

    Ok(LoadOutcome {
        records: result.records,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::{GuildViewError, LoadError, ParseFieldError};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_reports_records_and_rejects() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "guilds.txt",
            "Alpha - 100 - g1 - OwnerA\nBeta - 2,000 - g2 - OwnerB\nbad line\n",
        );

        let outcome = load_file(&path, MemberCountPolicy::Abort).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.summary.record_count, 2);
        assert_eq!(outcome.summary.lines_processed, 3);
        assert_eq!(outcome.summary.rejected_count, 1);
        assert_eq!(outcome.summary.rejected[0].text, "bad line");
        assert_eq!(outcome.summary.path, path);
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("absent.txt"), MemberCountPolicy::Abort).unwrap_err();
        assert!(matches!(err, GuildViewError::Load(LoadError::Io { .. })));
    }

    #[test]
    fn test_bad_member_count_surfaces_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "guilds.txt", "Alpha - lots - g1 - OwnerA\n");
        let err = load_file(&path, MemberCountPolicy::Abort).unwrap_err();
        assert!(matches!(
            err,
            GuildViewError::ParseField(ParseFieldError::MemberCount { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_retained_rejects_are_capped_but_counted() {
        let dir = TempDir::new().unwrap();
        let content = "junk\n".repeat(MAX_RETAINED_REJECTS + 5);
        let path = write(&dir, "junk.txt", &content);

        let outcome = load_file(&path, MemberCountPolicy::Abort).unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.summary.rejected_count, MAX_RETAINED_REJECTS + 5);
        assert_eq!(outcome.summary.rejected.len(), MAX_RETAINED_REJECTS);
    }
}
