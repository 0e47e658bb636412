// GuildView - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::MemberCountPolicy;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for GuildView configuration and data.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/guildview/ or %APPDATA%\GuildView\config\)
    pub config_dir: PathBuf,

    /// User locale catalog directory (<config_dir>/locales/)
    pub locales_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let locales_dir = config_dir.join(constants::LOCALES_DIR_NAME);

            tracing::debug!(
                config = %config_dir.display(),
                locales = %locales_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                locales_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self::rooted_at(Path::new("."))
        }
    }

    /// All paths under a single root. Used as the fallback and by tests.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            locales_dir: root.join(constants::LOCALES_DIR_NAME),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.config_dir.join(constants::PREFERENCES_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are ignored so a newer config file still loads.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub logging: LoggingSection,
    pub parsing: ParsingSection,
    pub export: ExportSection,
    pub ui: UiSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[parsing]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ParsingSection {
    /// "abort" or "reject".
    pub member_count_policy: Option<String>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// "localized" or "field_names".
    pub header_style: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Table row height in points.
    pub row_height: Option<f32>,
}

/// Text used for the export header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// Column labels in the active language.
    #[default]
    Localized,
    /// Stable field keys (`name`, `member_count`, `id`, `owner`).
    FieldNames,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Logging level string (used at init, before tracing is available).
    pub log_level: Option<String>,
    pub member_count_policy: MemberCountPolicy,
    pub header_style: HeaderStyle,
    pub row_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            member_count_policy: MemberCountPolicy::default(),
            header_style: HeaderStyle::default(),
            row_height: constants::DEFAULT_ROW_HEIGHT,
        }
    }
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults with one warning; the application
/// still starts.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Check every field of `raw`, accumulating a warning per rejected value.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Parsing: member_count_policy --
    if let Some(ref policy) = raw.parsing.member_count_policy {
        match policy.to_lowercase().as_str() {
            "abort" => config.member_count_policy = MemberCountPolicy::Abort,
            "reject" => config.member_count_policy = MemberCountPolicy::Reject,
            other => warnings.push(format!(
                "[parsing] member_count_policy = \"{other}\" is not recognised. \
                 Expected \"abort\" or \"reject\". Using default (abort).",
            )),
        }
    }

    // -- Export: header_style --
    if let Some(ref style) = raw.export.header_style {
        match style.to_lowercase().as_str() {
            "localized" => config.header_style = HeaderStyle::Localized,
            "field_names" => config.header_style = HeaderStyle::FieldNames,
            other => warnings.push(format!(
                "[export] header_style = \"{other}\" is not recognised. \
                 Expected \"localized\" or \"field_names\". Using default (localized).",
            )),
        }
    }

    // -- UI: row_height --
    if let Some(height) = raw.ui.row_height {
        if (constants::MIN_ROW_HEIGHT..=constants::MAX_ROW_HEIGHT).contains(&height) {
            config.row_height = height;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "ui.row_height".to_string(),
                value: height.to_string(),
                expected: format!(
                    "{} to {}",
                    constants::MIN_ROW_HEIGHT,
                    constants::MAX_ROW_HEIGHT
                ),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_ROW_HEIGHT
            ));
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_str(content: &str) -> (AppConfig, Vec<String>) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        load_config(&path)
    }

    #[test]
    fn test_missing_config_gives_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(&dir.path().join("absent.toml"));
        assert!(warnings.is_empty());
        assert_eq!(config.member_count_policy, MemberCountPolicy::Abort);
        assert_eq!(config.header_style, HeaderStyle::Localized);
        assert_eq!(config.row_height, constants::DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_valid_config_is_applied() {
        let (config, warnings) = load_str(
            r#"
[logging]
level = "DEBUG"

[parsing]
member_count_policy = "reject"

[export]
header_style = "field_names"

[ui]
row_height = 24.0
"#,
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.member_count_policy, MemberCountPolicy::Reject);
        assert_eq!(config.header_style, HeaderStyle::FieldNames);
        assert_eq!(config.row_height, 24.0);
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (config, warnings) = load_str(
            r#"
[logging]
level = "loud"

[parsing]
member_count_policy = "guess"

[export]
header_style = "fancy"

[ui]
row_height = 500.0
"#,
        );
        assert_eq!(warnings.len(), 4);
        assert!(config.log_level.is_none());
        assert_eq!(config.member_count_policy, MemberCountPolicy::Abort);
        assert_eq!(config.header_style, HeaderStyle::Localized);
        assert_eq!(config.row_height, constants::DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_unparseable_config_warns_once() {
        let (config, warnings) = load_str("[parsing\nmember_count_policy = ");
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.member_count_policy, MemberCountPolicy::Abort);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (_, warnings) = load_str("[future]\nsetting = 1\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_rooted_paths() {
        let paths = PlatformPaths::rooted_at(Path::new("/tmp/gv"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/gv/config.toml"));
        assert_eq!(paths.preferences_file(), PathBuf::from("/tmp/gv/preferences.json"));
        assert_eq!(paths.locales_dir, PathBuf::from("/tmp/gv/locales"));
    }
}
