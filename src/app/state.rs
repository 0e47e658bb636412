// GuildView - app/state.rs
//
// Application state management. Holds the view session, the sort/search
// selections, preferences, the active language, and pending notifications.
// Owned by the eframe::App implementation and passed to every panel.

use crate::app::loader::{self, LoadSummary};
use crate::core::export::{self, ExportFormat, Headers};
use crate::core::locale::Translator;
use crate::core::model::{Field, SortOrder};
use crate::core::view::ViewSession;
use crate::platform::config::{AppConfig, HeaderStyle};
use crate::platform::prefs::{self, Preferences};
use crate::util::error::{ExportError, GuildViewError};
use std::path::{Path, PathBuf};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message shown in a modal window until dismissed.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Loaded records and the displayed view over them.
    pub session: ViewSession,

    /// Validated config.toml values.
    pub config: AppConfig,

    /// Persistent user preferences.
    pub prefs: Preferences,

    /// Where preferences are saved. `None` disables saving.
    pub prefs_path: Option<PathBuf>,

    /// Loaded catalogs and the active language.
    pub translator: Translator,

    /// Sidebar sort selection.
    pub sort_field: Field,
    pub sort_order: SortOrder,

    /// Sidebar search selection.
    pub search_field: Field,
    pub search_term: String,
    pub search_case_sensitive: bool,
    pub search_regex: bool,

    /// Selected display row, if any.
    pub selected_row: Option<usize>,

    /// Summary of the most recent successful load.
    pub load_summary: Option<LoadSummary>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Pending modal notification.
    pub notification: Option<Notification>,

    /// Non-fatal startup warnings (config, locales).
    pub warnings: Vec<String>,

    pub show_load_summary: bool,
    pub show_about: bool,

    /// Set by Ctrl+F; the sidebar consumes it to focus the search entry.
    pub focus_search: bool,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        prefs: Preferences,
        prefs_path: Option<PathBuf>,
        translator: Translator,
    ) -> Self {
        let status_message = translator.t("status_ready").to_string();
        Self {
            session: ViewSession::new(),
            config,
            prefs,
            prefs_path,
            translator,
            sort_field: Field::MemberCount,
            sort_order: SortOrder::Descending,
            search_field: Field::Name,
            search_term: String::new(),
            search_case_sensitive: false,
            search_regex: false,
            selected_row: None,
            load_summary: None,
            status_message,
            notification: None,
            warnings: Vec::new(),
            show_load_summary: false,
            show_about: false,
            focus_search: false,
        }
    }

    /// Localized string for `key`.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translator.t(key)
    }

    /// Localized template with `{name}` placeholders filled in.
    pub fn tf(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    // -------------------------------------------------------------------------
    // Load / sort / search / export
    // -------------------------------------------------------------------------

    /// Load `path` into the session. On failure the previous session is kept
    /// and an error notification is raised. Returns whether the load succeeded.
    pub fn load_file(&mut self, path: &Path) -> bool {
        match loader::load_file(path, self.config.member_count_policy) {
            Ok(outcome) => {
                self.session.load(outcome.records);
                self.selected_row = None;
                let count = outcome.summary.record_count.to_string();
                let mut status = self.tf("status_loaded", &[("count", count.as_str())]);
                if outcome.summary.rejected_count > 0 {
                    let rejected = outcome.summary.rejected_count.to_string();
                    status.push_str(". ");
                    status.push_str(&self.tf("status_rejected", &[("count", rejected.as_str())]));
                }
                self.status_message = status;
                self.load_summary = Some(outcome.summary);
                true
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Load failed");
                self.report_error("error_load", e);
                false
            }
        }
    }

    /// Sort the displayed rows by the sidebar selection. No-op before a load.
    pub fn apply_sort(&mut self) {
        if !self.session.is_loaded() {
            return;
        }
        self.session.sort(self.sort_field, self.sort_order);
        self.selected_row = None;
        let label = self.translator.field_label(self.sort_field).to_string();
        self.status_message = self.tf("status_sorted", &[("field", label.as_str())]);
    }

    /// Sort by a clicked column header: the same column toggles the order,
    /// a new column starts ascending.
    pub fn sort_by_header(&mut self, field: Field) {
        if field == self.sort_field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Ascending;
        }
        self.apply_sort();
    }

    /// Search the original records with the sidebar selection. The term is
    /// trimmed; an empty term shows everything. No-op before a load.
    pub fn apply_search(&mut self) {
        if !self.session.is_loaded() {
            return;
        }
        let term = self.search_term.trim().to_string();
        let case_insensitive = !self.search_case_sensitive;

        let matches = if self.search_regex {
            let outcome = self
                .session
                .search_regex(self.search_field, &term, case_insensitive)
                .map(|rows| rows.len());
            match outcome {
                Ok(count) => count,
                Err(e) => {
                    tracing::debug!(error = %e, "Search pattern rejected");
                    self.report_error("error_search", e);
                    return;
                }
            }
        } else {
            self.session
                .search(self.search_field, &term, case_insensitive)
                .len()
        };

        self.selected_row = None;
        let count = matches.to_string();
        self.status_message = self.tf("status_searched", &[("count", count.as_str())]);
    }

    /// Export header row according to `[export] header_style`.
    pub fn headers(&self) -> Headers {
        match self.config.header_style {
            HeaderStyle::FieldNames => export::field_name_headers(),
            HeaderStyle::Localized => {
                [Field::Name, Field::MemberCount, Field::Id, Field::Owner]
                    .map(|field| self.translator.field_label(field).to_string())
            }
        }
    }

    /// Export the displayed rows to `path` and raise a notification for the
    /// outcome. Never-loaded and empty views fail with `NoData`.
    pub fn export_to(&mut self, path: &Path) -> Result<usize, ExportError> {
        let format = ExportFormat::from_path(path);
        let headers = self.headers();
        let result = self.session.export(path, format, &headers);

        match &result {
            Ok(_) => {
                let message = format!("{} {}", self.t("success_export"), path.display());
                self.status_message = message.clone();
                self.notification = Some(Notification {
                    kind: NotificationKind::Success,
                    title: self.t("success").to_string(),
                    message,
                });
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Export failed");
                let message = format!("{} {e}", self.t("error_export"));
                self.notify_error(message);
            }
        }
        result
    }

    // -------------------------------------------------------------------------
    // Clipboard text
    // -------------------------------------------------------------------------

    /// Text of one cell of display row `row`.
    pub fn copy_field(&self, row: usize, field: Field) -> Option<String> {
        self.session
            .record_at(row)
            .map(|record| record.field_text(field).into_owned())
    }

    /// All cells of display row `row`, tab separated, in column order.
    pub fn copy_row(&self, row: usize) -> Option<String> {
        self.session.record_at(row).map(|record| {
            Field::all()
                .iter()
                .map(|field| record.field_text(*field))
                .collect::<Vec<_>>()
                .join("\t")
        })
    }

    // -------------------------------------------------------------------------
    // Preferences
    // -------------------------------------------------------------------------

    /// Switch the UI language and persist it. Unknown codes are ignored.
    pub fn set_language(&mut self, code: &str) {
        if !self.translator.set_language(code) {
            tracing::warn!(code, "No catalog for language");
            return;
        }
        if self.prefs.language != self.translator.language() {
            self.prefs.language = self.translator.language().to_string();
            tracing::info!(language = %self.prefs.language, "Language changed");
            self.save_prefs();
        }
    }

    /// Switch between dark and light theme and persist it.
    pub fn set_dark_mode(&mut self, dark: bool) {
        if self.prefs.is_dark() == dark {
            return;
        }
        self.prefs.theme = if dark { "dark" } else { "light" }.to_string();
        tracing::info!(theme = %self.prefs.theme, "Theme changed");
        self.save_prefs();
    }

    fn save_prefs(&mut self) {
        let Some(path) = self.prefs_path.clone() else {
            return;
        };
        if let Err(e) = prefs::save(&self.prefs, &path) {
            let err = GuildViewError::from(e);
            tracing::warn!(error = %err, "Could not save preferences");
            self.warnings.push(err.to_string());
        }
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Raise an error notification headed by the localized `heading_key`.
    pub fn report_error(&mut self, heading_key: &str, err: impl Into<GuildViewError>) {
        let err = err.into();
        let message = format!("{} {}", self.t(heading_key), err.cause());
        self.notify_error(message);
    }

    pub fn notify_error(&mut self, message: String) {
        self.status_message = message.clone();
        self.notification = Some(Notification {
            kind: NotificationKind::Error,
            title: self.t("error").to_string(),
            message,
        });
    }

    /// "shown of total" label for the status bar.
    pub fn rows_shown_label(&self) -> String {
        let shown = self.session.len().to_string();
        let total = self.session.total().to_string();
        self.tf("rows_shown", &[("shown", shown.as_str()), ("total", total.as_str())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::DEFAULT_LANGUAGE;
    use tempfile::TempDir;

    const SAMPLE: &str = "Alpha - 100 - g1 - OwnerA\nBeta - 2,000 - g2 - OwnerB\nbad line\n";

    fn state_in(dir: &TempDir) -> AppState {
        AppState::new(
            AppConfig::default(),
            Preferences::default(),
            Some(dir.path().join("preferences.json")),
            Translator::default(),
        )
    }

    fn loaded_state(dir: &TempDir) -> AppState {
        let path = dir.path().join("guilds.txt");
        std::fs::write(&path, SAMPLE).unwrap();
        let mut state = state_in(dir);
        assert!(state.load_file(&path));
        state
    }

    fn displayed_names(state: &AppState) -> Vec<String> {
        state.session.displayed().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_defaults_match_sidebar_defaults() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        assert_eq!(state.sort_field, Field::MemberCount);
        assert_eq!(state.sort_order, SortOrder::Descending);
        assert_eq!(state.search_field, Field::Name);
        assert_eq!(state.translator.language(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_load_sets_summary_and_status() {
        let dir = TempDir::new().unwrap();
        let state = loaded_state(&dir);
        assert_eq!(state.session.total(), 2);
        let summary = state.load_summary.as_ref().unwrap();
        assert_eq!(summary.rejected_count, 1);
        assert!(state.status_message.contains('2'));
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_session() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        assert!(!state.load_file(&dir.path().join("absent.txt")));
        assert_eq!(state.session.total(), 2);
        let note = state.notification.as_ref().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.title, "Error");
    }

    #[test]
    fn test_bad_member_count_aborts_and_keeps_previous_session() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        state.search_term = "beta".to_string();
        state.apply_search();

        let bad = dir.path().join("bad.txt");
        std::fs::write(&bad, "Gamma - 5 - g3 - o\nAlpha - lots - g1 - o\n").unwrap();
        assert!(!state.load_file(&bad));

        assert_eq!(state.session.total(), 2);
        assert_eq!(state.session.len(), 1, "displayed view is kept too");
        assert_eq!(state.load_summary.as_ref().unwrap().record_count, 2);
        let note = state.notification.as_ref().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert!(note.message.contains("line 2"), "got: {}", note.message);
        assert!(note.message.contains("'lots'"), "got: {}", note.message);
    }

    #[test]
    fn test_report_error_uses_localized_heading() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);
        state.report_error("error_export", ExportError::NoData);
        let note = state.notification.as_ref().unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert!(note.message.starts_with(state.t("error_export")));
        assert!(note.message.ends_with(&ExportError::NoData.to_string()));
        assert!(!note.message.contains("Export error:"));
    }

    #[test]
    fn test_sort_and_search_before_load_are_noops() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);
        state.apply_sort();
        state.search_term = "x".to_string();
        state.apply_search();
        assert!(!state.session.is_loaded());
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_default_sort_is_member_count_descending() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        state.apply_sort();
        assert_eq!(displayed_names(&state), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_header_click_toggles_then_resets() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        state.sort_by_header(Field::MemberCount);
        assert_eq!(state.sort_order, SortOrder::Ascending);
        assert_eq!(displayed_names(&state), vec!["Alpha", "Beta"]);

        state.sort_by_header(Field::Name);
        assert_eq!(state.sort_field, Field::Name);
        assert_eq!(state.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn test_search_term_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        state.search_term = "  beta  ".to_string();
        state.apply_search();
        assert_eq!(displayed_names(&state), vec!["Beta"]);
    }

    #[test]
    fn test_invalid_regex_notifies_and_keeps_view() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        state.search_regex = true;
        state.search_term = "(".to_string();
        state.apply_search();
        assert_eq!(state.session.len(), 2);
        assert_eq!(
            state.notification.as_ref().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[test]
    fn test_copy_field_and_row_follow_display_order() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        state.apply_sort();
        assert_eq!(state.copy_field(0, Field::Id).as_deref(), Some("g2"));
        assert_eq!(state.copy_field(1, Field::Owner).as_deref(), Some("OwnerA"));
        assert_eq!(state.copy_row(0).as_deref(), Some("Beta\t2000\tg2\tOwnerB"));
        assert!(state.copy_row(5).is_none());
    }

    #[test]
    fn test_headers_follow_config_and_language() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);
        assert_eq!(state.headers()[0], "Guild Name");
        state.set_language("de");
        assert_eq!(state.headers()[0], "Gildenname");
        state.config.header_style = HeaderStyle::FieldNames;
        assert_eq!(state.headers(), export::field_name_headers());
    }

    #[test]
    fn test_export_without_load_fails_and_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);
        let target = dir.path().join("out.xlsx");
        assert!(matches!(state.export_to(&target), Err(ExportError::NoData)));
        assert!(!target.exists());
        assert_eq!(
            state.notification.as_ref().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }

    #[test]
    fn test_export_writes_displayed_rows() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        state.config.header_style = HeaderStyle::FieldNames;
        state.search_term = "alpha".to_string();
        state.apply_search();

        let target = dir.path().join("out.csv");
        assert_eq!(state.export_to(&target).unwrap(), 1);
        let written = std::fs::read_to_string(&target).unwrap();
        assert_eq!(written, "name,member_count,id,owner\nAlpha,100,g1,OwnerA\n");
        assert_eq!(
            state.notification.as_ref().map(|n| n.kind),
            Some(NotificationKind::Success)
        );
    }

    #[test]
    fn test_language_change_is_persisted() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);
        state.set_language("fr");
        assert_eq!(state.t("sort"), "Trier");

        let (saved, _) = prefs::load_or_create(&dir.path().join("preferences.json"));
        assert_eq!(saved.language, "fr");
    }

    #[test]
    fn test_unknown_language_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);
        state.set_language("zz");
        assert_eq!(state.prefs.language, "en");
        assert!(!dir.path().join("preferences.json").exists());
    }

    #[test]
    fn test_theme_change_is_persisted() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);
        state.set_dark_mode(false);
        let (saved, _) = prefs::load_or_create(&dir.path().join("preferences.json"));
        assert_eq!(saved.theme, "light");
    }

    #[test]
    fn test_rows_shown_label() {
        let dir = TempDir::new().unwrap();
        let mut state = loaded_state(&dir);
        state.search_term = "beta".to_string();
        state.apply_search();
        assert_eq!(state.rows_shown_label(), "1 of 2 guilds");
    }
}
