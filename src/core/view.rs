// GuildView - core/view.rs
//
// The view session: the full record set of the last successful load plus
// the currently displayed ordering/subset of it.
//
// `current` holds indices into `original`, so a sort or search never copies
// records. Search always restarts from `original`; sort reorders whatever
// `current` holds at the time. Both replace `current` wholesale.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::export::{self, ExportFormat, Headers};
use crate::core::model::{Field, GuildRecord, SortOrder};
use crate::util::error::{ExportError, FilterError};
use regex::RegexBuilder;
use std::path::Path;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing has been loaded yet.
    #[default]
    Empty,
    /// A record set is loaded (possibly with zero records).
    Loaded,
}

/// Original records plus the displayed view over them.
#[derive(Debug, Default)]
pub struct ViewSession {
    state: SessionState,
    original: Vec<GuildRecord>,
    current: Vec<usize>,
}

impl ViewSession {
    /// A session with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already loaded with `records`.
    pub fn with_records(records: Vec<GuildRecord>) -> Self {
        let mut session = Self::new();
        session.load(records);
        session
    }

    /// Replace both the original set and the displayed view with `records`.
    pub fn load(&mut self, records: Vec<GuildRecord>) {
        self.current = (0..records.len()).collect();
        self.original = records;
        self.state = SessionState::Loaded;
        tracing::debug!(records = self.original.len(), "Session loaded");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == SessionState::Loaded
    }

    /// All records of the last load, in file order.
    pub fn original(&self) -> &[GuildRecord] {
        &self.original
    }

    /// Indices into `original()` of the displayed rows, in display order.
    pub fn current(&self) -> &[usize] {
        &self.current
    }

    /// Number of displayed rows.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Number of records in the original set.
    pub fn total(&self) -> usize {
        self.original.len()
    }

    /// Displayed records in display order.
    pub fn displayed(&self) -> impl Iterator<Item = &GuildRecord> + '_ {
        self.current.iter().filter_map(|&i| self.original.get(i))
    }

    /// The record shown at display row `row`, if any.
    pub fn record_at(&self, row: usize) -> Option<&GuildRecord> {
        self.current.get(row).and_then(|&i| self.original.get(i))
    }

    /// Stably reorder the displayed rows by `field`.
    ///
    /// Operates on the current view, so successive sorts compose. Equal keys
    /// keep their prior relative order in both directions.
    pub fn sort(&mut self, field: Field, order: SortOrder) -> &[usize] {
        let original = &self.original;
        let mut next = self.current.clone();
        next.sort_by(|&a, &b| {
            let ordering = original[a].compare_by(&original[b], field);
            if order.is_ascending() {
                ordering
            } else {
                ordering.reverse()
            }
        });
        self.current = next;

        tracing::debug!(field = %field, ?order, rows = self.current.len(), "View sorted");
        &self.current
    }

    /// Show the records of the original set whose `field` contains `term`.
    ///
    /// Always starts from the original set: any previous search or sort is
    /// discarded. An empty term shows every record in file order.
    pub fn search(&mut self, field: Field, term: &str, case_insensitive: bool) -> &[usize] {
        self.current = if term.is_empty() {
            (0..self.original.len()).collect()
        } else if case_insensitive {
            let term_lower = term.to_lowercase();
            self.matching(|r| r.field_text(field).to_lowercase().contains(&term_lower))
        } else {
            self.matching(|r| r.field_text(field).contains(term))
        };

        tracing::debug!(
            field = %field,
            case_insensitive,
            matches = self.current.len(),
            total = self.original.len(),
            "Search applied"
        );
        &self.current
    }

    /// Like [`search`](Self::search) but `pattern` is a regular expression.
    ///
    /// On an invalid pattern the view is left unchanged.
    pub fn search_regex(
        &mut self,
        field: Field,
        pattern: &str,
        case_insensitive: bool,
    ) -> Result<&[usize], FilterError> {
        if pattern.is_empty() {
            return Ok(self.search(field, pattern, case_insensitive));
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|e| FilterError::InvalidRegex {
                pattern: pattern.to_string(),
                source: e,
            })?;

        self.current = self.matching(|r| regex.is_match(&r.field_text(field)));

        tracing::debug!(
            field = %field,
            pattern,
            matches = self.current.len(),
            "Regex search applied"
        );
        Ok(&self.current)
    }

    /// Write the displayed rows, in display order, to `path`.
    ///
    /// A never-loaded or empty view fails with `ExportError::NoData` and
    /// leaves `path` untouched.
    pub fn export(
        &self,
        path: &Path,
        format: ExportFormat,
        headers: &Headers,
    ) -> Result<usize, ExportError> {
        if !self.is_loaded() {
            return Err(ExportError::NoData);
        }
        export::export_to_path(self.displayed(), headers, format, path)
    }

    fn matching<F>(&self, predicate: F) -> Vec<usize>
    where
        F: Fn(&GuildRecord) -> bool,
    {
        self.original
            .iter()
            .enumerate()
            .filter(|(_, record)| predicate(record))
            .map(|(idx, _)| idx)
            .collect()
    }
}
