// GuildView - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "GuildView";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "GuildView";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input format
// =============================================================================

/// Literal separator between the four fields of a guild line.
pub const FIELD_SEPARATOR: &str = " - ";

/// Number of fields a well-formed guild line splits into.
pub const FIELD_COUNT: usize = 4;

/// Thousands separator stripped from the member count before parsing.
pub const THOUSANDS_SEPARATOR: char = ',';

/// Largest input file accepted by the loader. The whole file is held in
/// memory, so anything beyond this is refused with a load error.
pub const MAX_INPUT_FILE_BYTES: u64 = 256 * 1024 * 1024; // 256 MB

/// File extensions offered by the open dialog.
pub const INPUT_FILE_EXTENSIONS: &[&str] = &["txt"];

// =============================================================================
// Diagnostics
// =============================================================================

/// Maximum number of rejected lines kept for the Load Summary dialog.
/// All rejects are still counted; only the retained text is capped.
pub const MAX_RETAINED_REJECTS: usize = 1_000;

/// Maximum number of rejected lines written to the log individually.
pub const MAX_LOGGED_REJECTS: usize = 50;

/// Maximum length of a line included in log output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Export
// =============================================================================

/// Worksheet name used for XLSX exports.
pub const XLSX_SHEET_NAME: &str = "Guilds";

/// Maximum data rows in one XLSX worksheet (Excel's 1,048,576 rows minus
/// the header row).
pub const MAX_XLSX_DATA_ROWS: usize = 1_048_575;

/// Largest member count written as an XLSX number. Spreadsheet numbers are
/// doubles; larger counts are written as text to keep every digit.
pub const MAX_EXACT_XLSX_NUMBER: u64 = 1 << 53;

/// Default column width (characters) for exported XLSX columns.
pub const XLSX_COLUMN_WIDTH: f64 = 24.0;

/// Base name suggested by the save dialog.
pub const DEFAULT_EXPORT_STEM: &str = "guilds";

// =============================================================================
// UI defaults
// =============================================================================

/// Default table row height in points.
pub const DEFAULT_ROW_HEIGHT: f32 = 30.0;

/// Minimum user-configurable row height.
pub const MIN_ROW_HEIGHT: f32 = 16.0;

/// Maximum user-configurable row height.
pub const MAX_ROW_HEIGHT: f32 = 60.0;

// =============================================================================
// Preferences defaults
// =============================================================================

/// Default theme name.
pub const DEFAULT_THEME: &str = "dark";

/// Default accent colour.
pub const DEFAULT_ACCENT_COLOR: &str = "#007bff";

/// Default font family name.
pub const DEFAULT_FONT_FAMILY: &str = "Roboto";

/// Default (and fallback) language code.
pub const DEFAULT_LANGUAGE: &str = "en";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Preferences file name (stored in the platform config directory).
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// User locale catalogs subdirectory name.
pub const LOCALES_DIR_NAME: &str = "locales";

/// Maximum size of a locale catalog file in bytes.
pub const MAX_LOCALE_FILE_SIZE: u64 = 64 * 1024; // 64 KB

/// Maximum number of locale catalogs (built-in + user).
pub const MAX_LOCALES: usize = 64;
