// GuildView - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every variant keeps its cause so the
// full chain can be logged.

use std::fmt;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Top-level error type for all GuildView operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum GuildViewError {
    /// The input file could not be opened, read, or decoded.
    Load(LoadError),

    /// A field of an otherwise well-formed line could not be converted.
    ParseField(ParseFieldError),

    /// A search pattern was invalid.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// The rendering surface is unavailable.
    Display(DisplayError),

    /// Configuration or preferences loading/saving failed.
    Config(ConfigError),

    /// A locale catalog could not be loaded.
    Locale(LocaleError),
}

impl fmt::Display for GuildViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Load error: {e}"),
            Self::ParseField(e) => write!(f, "Parse error: {e}"),
            Self::Filter(e) => write!(f, "Search error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Display(e) => write!(f, "Display error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Locale(e) => write!(f, "Locale error: {e}"),
        }
    }
}

impl GuildViewError {
    /// The subsystem error without the category prefix, for user-facing
    /// messages that already carry their own heading.
    pub fn cause(&self) -> &(dyn std::error::Error + 'static) {
        match self {
            Self::Load(e) => e,
            Self::ParseField(e) => e,
            Self::Filter(e) => e,
            Self::Export(e) => e,
            Self::Display(e) => e,
            Self::Config(e) => e,
            Self::Locale(e) => e,
        }
    }
}

impl std::error::Error for GuildViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::ParseField(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Display(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Locale(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors raised while reading an input file. The session is never touched
/// when one of these is returned.
#[derive(Debug)]
pub enum LoadError {
    /// The file is missing or unreadable.
    Io { path: PathBuf, source: io::Error },

    /// The file content is not valid UTF-8.
    InvalidEncoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// The file exceeds the in-memory load limit.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            Self::InvalidEncoding { path, source } => {
                write!(f, "'{}': invalid UTF-8 encoding: {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::FileTooLarge { .. } => None,
        }
    }
}

impl From<LoadError> for GuildViewError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Parse field errors
// ---------------------------------------------------------------------------

/// A line split into the right number of fields but one of them could not
/// be converted to its semantic type.
#[derive(Debug)]
pub enum ParseFieldError {
    /// The member count was not a non-negative integer after removing
    /// thousands separators.
    MemberCount {
        line_number: usize,
        raw_value: String,
        line: String,
        source: ParseIntError,
    },
}

impl ParseFieldError {
    /// 1-based line number of the offending line.
    pub fn line_number(&self) -> usize {
        match self {
            Self::MemberCount { line_number, .. } => *line_number,
        }
    }
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemberCount {
                line_number,
                raw_value,
                source,
                ..
            } => write!(
                f,
                "line {line_number}: member count '{raw_value}' is not a valid number ({source})"
            ),
        }
    }
}

impl std::error::Error for ParseFieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MemberCount { source, .. } => Some(source),
        }
    }
}

impl From<ParseFieldError> for GuildViewError {
    fn from(e: ParseFieldError) -> Self {
        Self::ParseField(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to search operations.
#[derive(Debug)]
pub enum FilterError {
    /// User-provided regex is invalid.
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegex { pattern, source } => {
                write!(f, "Invalid search pattern '{pattern}': {source}")
            }
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidRegex { source, .. } => Some(source),
        }
    }
}

impl From<FilterError> for GuildViewError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// Nothing is loaded or the current view is empty.
    NoData,

    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// XLSX workbook error (including an unwritable target).
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    /// The view has more rows than a single worksheet can hold.
    TooManyRows { count: usize, max: usize },

    /// Two columns share a header, which JSON keys cannot represent.
    DuplicateHeader { header: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => write!(f, "There is no data to export. Load a file first."),
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::Xlsx { path, source } => {
                write!(f, "XLSX export error '{}': {source}", path.display())
            }
            Self::TooManyRows { count, max } => write!(
                f,
                "Export of {count} rows exceeds the worksheet maximum of {max}. \
                 Search to reduce the result set or export to CSV."
            ),
            Self::DuplicateHeader { header } => write!(
                f,
                "Column header '{header}' is used more than once. \
                 Use distinct column labels or export to CSV."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Xlsx { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for GuildViewError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

/// Errors related to the rendering surface.
#[derive(Debug)]
pub enum DisplayError {
    /// The native window could not be created.
    Launch { source: eframe::Error },

    /// The table surface was asked to render before it was available.
    NoTable,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Launch { source } => write!(f, "cannot open application window: {source}"),
            Self::NoTable => write!(f, "the table view is not available"),
        }
    }
}

impl std::error::Error for DisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Launch { source } => Some(source),
            Self::NoTable => None,
        }
    }
}

impl From<DisplayError> for GuildViewError {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration and preferences files.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// JSON (de)serialisation of the preferences file failed.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading or writing a config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "Preferences error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::ValueOutOfRange { .. } => None,
        }
    }
}

impl From<ConfigError> for GuildViewError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Locale errors
// ---------------------------------------------------------------------------

/// Errors related to locale catalog loading.
#[derive(Debug)]
pub enum LocaleError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalog file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is missing from the catalog.
    MissingField { path: PathBuf, field: &'static str },

    /// Maximum number of catalogs exceeded.
    TooManyLocales { count: usize, max: usize },

    /// I/O error reading a catalog file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LocaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse locale '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Locale '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { path, field } => {
                write!(
                    f,
                    "Locale '{}': missing required field '{field}'",
                    path.display()
                )
            }
            Self::TooManyLocales { count, max } => {
                write!(f, "Too many locales loaded ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading locale '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LocaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LocaleError> for GuildViewError {
    fn from(e: LocaleError) -> Self {
        Self::Locale(e)
    }
}

/// Convenience type alias for GuildView results.
pub type Result<T> = std::result::Result<T, GuildViewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn member_count_error_names_the_line() {
        let source = "abc".parse::<u64>().unwrap_err();
        let err = ParseFieldError::MemberCount {
            line_number: 7,
            raw_value: "abc".to_string(),
            line: "A - abc - 1 - B".to_string(),
            source,
        };
        assert_eq!(err.line_number(), 7);
        let msg = err.to_string();
        assert!(msg.contains("line 7"), "got: {msg}");
        assert!(msg.contains("'abc'"), "got: {msg}");
    }

    #[test]
    fn top_level_error_preserves_source_chain() {
        let err: GuildViewError = LoadError::Io {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        }
        .into();
        let load = err.source().expect("load error source");
        assert!(load.source().is_some(), "io error must be chained");
        assert!(err.to_string().starts_with("Load error:"));
    }

    #[test]
    fn no_data_export_message_is_actionable() {
        assert!(ExportError::NoData.to_string().contains("Load a file"));
    }

    #[test]
    fn subsystem_errors_convert_into_top_level() {
        let filter: GuildViewError = FilterError::InvalidRegex {
            pattern: "(".to_string(),
            source: regex::Regex::new("(").unwrap_err(),
        }
        .into();
        assert!(matches!(filter, GuildViewError::Filter(_)));
        assert!(filter.to_string().starts_with("Search error:"));

        let export: GuildViewError = ExportError::NoData.into();
        assert!(matches!(export, GuildViewError::Export(ExportError::NoData)));
        assert_eq!(export.cause().to_string(), ExportError::NoData.to_string());

        let display: GuildViewError = DisplayError::NoTable.into();
        assert!(matches!(display, GuildViewError::Display(DisplayError::NoTable)));

        let config: GuildViewError = ConfigError::Io {
            path: PathBuf::from("prefs.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(config.to_string().starts_with("Configuration error:"));
        assert!(config.cause().source().is_some());

        let locale: GuildViewError = LocaleError::TooManyLocales { count: 70, max: 64 }.into();
        assert!(locale.to_string().starts_with("Locale error:"));
    }
}
