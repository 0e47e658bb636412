// GuildView - platform/prefs.rs
//
// User preferences persisted as JSON: theme, accent colour, font family and
// language.
//
// - Saved atomically (write temp, rename) so a crash during save never
//   corrupts the previous file.
// - A missing file is created with defaults on first load.
// - A malformed file is not overwritten on load; defaults are used until the
//   next explicit save.

use crate::util::constants;
use crate::util::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persistent user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// "dark" or "light".
    pub theme: String,
    /// Accent colour as `#rrggbb`.
    pub accent_color: String,
    pub font_family: String,
    /// Language code of the active catalog.
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: constants::DEFAULT_THEME.to_string(),
            accent_color: constants::DEFAULT_ACCENT_COLOR.to_string(),
            font_family: constants::DEFAULT_FONT_FAMILY.to_string(),
            language: constants::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Preferences {
    pub fn is_dark(&self) -> bool {
        !self.theme.eq_ignore_ascii_case("light")
    }
}

/// Where the preferences came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefsSource {
    /// Read from an existing, valid file.
    File,
    /// File was absent and has been created with defaults.
    Created,
    /// File was unreadable or malformed; defaults are in use.
    Fallback,
}

/// Load preferences from `path`, creating the file with defaults if absent.
///
/// Never fails: problems are logged and defaults returned.
pub fn load_or_create(path: &Path) -> (Preferences, PrefsSource) {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Preferences>(&content) {
            Ok(prefs) => {
                tracing::info!(path = %path.display(), "Preferences loaded");
                (prefs, PrefsSource::File)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Preferences file is malformed, using defaults"
                );
                (Preferences::default(), PrefsSource::Fallback)
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let prefs = Preferences::default();
            match save(&prefs, path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "Created default preferences file");
                    (prefs, PrefsSource::Created)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Could not create preferences file");
                    (prefs, PrefsSource::Fallback)
                }
            }
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Cannot read preferences file, using defaults"
            );
            (Preferences::default(), PrefsSource::Fallback)
        }
    }
}

/// Save `prefs` to `path` atomically (write temp, rename).
///
/// Creates parent directories as needed.
pub fn save(prefs: &Preferences, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let json = serde_json::to_string_pretty(prefs).map_err(|e| ConfigError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes()).map_err(|e| ConfigError::Io {
        path: tmp.clone(),
        source: e,
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    tracing::debug!(path = %path.display(), "Preferences saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let (prefs, source) = load_or_create(&path);
        assert_eq!(source, PrefsSource::Created);
        assert_eq!(prefs, Preferences::default());
        assert!(path.exists());

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["theme"], "dark");
        assert_eq!(written["accent_color"], "#007bff");
        assert_eq!(written["font_family"], "Roboto");
        assert_eq!(written["language"], "en");
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(
            &path,
            r##"{"theme":"light","accent_color":"#ff0000","font_family":"Arial","language":"de"}"##,
        )
        .unwrap();

        let (prefs, source) = load_or_create(&path);
        assert_eq!(source, PrefsSource::File);
        assert_eq!(prefs.language, "de");
        assert!(!prefs.is_dark());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{"language":"fr"}"#).unwrap();

        let (prefs, _) = load_or_create(&path);
        assert_eq!(prefs.language, "fr");
        assert_eq!(prefs.theme, "dark");
    }

    #[test]
    fn test_malformed_file_is_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, b"not json {{").unwrap();

        let (prefs, source) = load_or_create(&path);
        assert_eq!(source, PrefsSource::Fallback);
        assert_eq!(prefs, Preferences::default());
        assert_eq!(std::fs::read(&path).unwrap(), b"not json {{");
    }

    #[test]
    fn test_save_replaces_leftover_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let prefs = Preferences {
            language: "de".to_string(),
            ..Default::default()
        };
        save(&prefs, &path).unwrap();

        let (loaded, source) = load_or_create(&path);
        assert_eq!(source, PrefsSource::File);
        assert_eq!(loaded.language, "de");
        assert!(!path.with_extension("json.tmp").exists());
    }
}
