// GuildView - core/locale.rs
//
// UI string catalogs: TOML parsing, validation, and keyed lookup with
// fallback to English and then to the key itself.
// Core layer: accepts TOML strings, never touches the filesystem.
// Disk loading of user catalogs lives in app::locale_mgr.

use crate::core::model::{Field, SortOrder};
use crate::util::constants::DEFAULT_LANGUAGE;
use crate::util::error::LocaleError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw catalog as deserialized from a .toml file.
#[derive(Debug, Deserialize)]
pub struct CatalogDefinition {
    pub locale: LocaleMeta,
    #[serde(default)]
    pub strings: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct LocaleMeta {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// A validated catalog ready for lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Lower-case language code, e.g. "en".
    pub code: String,
    /// Display name in the language itself, e.g. "Deutsch".
    pub name: String,
    pub strings: HashMap<String, String>,
    pub is_builtin: bool,
    pub source_path: Option<PathBuf>,
}

/// Parse a TOML string into a `CatalogDefinition`.
///
/// `source_path` is used for error messages only.
pub fn parse_catalog_toml(
    content: &str,
    source_path: &Path,
) -> Result<CatalogDefinition, LocaleError> {
    toml::from_str(content).map_err(|e| LocaleError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Check required fields and normalise the language code.
pub fn validate(
    def: CatalogDefinition,
    source_path: &Path,
    is_builtin: bool,
) -> Result<Catalog, LocaleError> {
    let code = def.locale.code.trim().to_ascii_lowercase();
    if code.is_empty() {
        return Err(LocaleError::MissingField {
            path: source_path.to_path_buf(),
            field: "locale.code",
        });
    }
    if def.locale.name.trim().is_empty() {
        return Err(LocaleError::MissingField {
            path: source_path.to_path_buf(),
            field: "locale.name",
        });
    }

    Ok(Catalog {
        code,
        name: def.locale.name.trim().to_string(),
        strings: def.strings,
        is_builtin,
        source_path: if is_builtin {
            None
        } else {
            Some(source_path.to_path_buf())
        },
    })
}

// =============================================================================
// Built-in catalogs (embedded at compile time)
// =============================================================================

/// Embedded catalogs as (filename, TOML content).
pub fn builtin_catalog_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        ("en.toml", include_str!("../../locales/en.toml")),
        ("de.toml", include_str!("../../locales/de.toml")),
        ("fr.toml", include_str!("../../locales/fr.toml")),
    ]
}

/// Load and validate all built-in catalogs. Failures are logged and skipped.
pub fn load_builtin_catalogs() -> Vec<Catalog> {
    let mut catalogs = Vec::new();

    for (filename, content) in builtin_catalog_sources() {
        let path = PathBuf::from(format!("<builtin>/{filename}"));
        match parse_catalog_toml(content, &path).and_then(|def| validate(def, &path, true)) {
            Ok(catalog) => {
                tracing::debug!(code = %catalog.code, strings = catalog.strings.len(), "Loaded built-in locale");
                catalogs.push(catalog);
            }
            Err(e) => {
                tracing::error!(file = filename, error = %e, "Failed to load built-in locale");
            }
        }
    }

    catalogs
}

// =============================================================================
// Translator
// =============================================================================

/// The set of loaded catalogs plus the active language.
#[derive(Debug, Clone)]
pub struct Translator {
    catalogs: Vec<Catalog>,
    active: Option<usize>,
    fallback: Option<usize>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(load_builtin_catalogs(), DEFAULT_LANGUAGE)
    }
}

impl Translator {
    /// Build a translator over `catalogs`, activating `language`.
    ///
    /// An unknown language falls back to English with a warning.
    pub fn new(catalogs: Vec<Catalog>, language: &str) -> Self {
        let fallback = catalogs.iter().position(|c| c.code == DEFAULT_LANGUAGE);
        let mut translator = Self {
            catalogs,
            active: fallback,
            fallback,
        };
        if !translator.set_language(language) {
            tracing::warn!(
                language,
                fallback = DEFAULT_LANGUAGE,
                "Unknown language, using fallback"
            );
        }
        translator
    }

    /// Switch the active language. Returns `false` (and keeps the current
    /// language) when no catalog has that code.
    pub fn set_language(&mut self, code: &str) -> bool {
        let code = code.trim().to_ascii_lowercase();
        match self.catalogs.iter().position(|c| c.code == code) {
            Some(idx) => {
                self.active = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Code of the active catalog, or the default language when none loaded.
    pub fn language(&self) -> &str {
        self.active
            .and_then(|i| self.catalogs.get(i))
            .map(|c| c.code.as_str())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// (code, display name) of every loaded catalog.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.catalogs
            .iter()
            .map(|c| (c.code.as_str(), c.name.as_str()))
    }

    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }

    /// Look up `key` in the active catalog, then English, then return the
    /// key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        [self.active, self.fallback]
            .into_iter()
            .flatten()
            .filter_map(|i| self.catalogs.get(i))
            .find_map(|c| c.strings.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    pub fn field_label(&self, field: Field) -> &str {
        self.t(field.label_key())
    }

    pub fn order_label(&self, order: SortOrder) -> &str {
        self.t(order.label_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(code: &str, pairs: &[(&str, &str)]) -> Catalog {
        Catalog {
            code: code.to_string(),
            name: code.to_uppercase(),
            strings: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            is_builtin: true,
            source_path: None,
        }
    }

    #[test]
    fn test_builtin_catalogs_load() {
        let catalogs = load_builtin_catalogs();
        let codes: Vec<_> = catalogs.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "de", "fr"]);
    }

    #[test]
    fn test_builtin_catalogs_cover_english_keys() {
        let catalogs = load_builtin_catalogs();
        let en = catalogs.iter().find(|c| c.code == "en").unwrap();
        for other in catalogs.iter().filter(|c| c.code != "en") {
            for key in en.strings.keys() {
                assert!(
                    other.strings.contains_key(key),
                    "locale '{}' is missing key '{key}'",
                    other.code
                );
            }
        }
    }

    #[test]
    fn test_field_labels_present_in_english() {
        let translator = Translator::default();
        for field in Field::all() {
            assert_ne!(translator.field_label(*field), field.label_key());
        }
    }

    #[test]
    fn test_lookup_falls_back_to_english_then_key() {
        let translator = Translator::new(
            vec![
                catalog("en", &[("title", "Guild List"), ("sort", "Sort")]),
                catalog("de", &[("title", "Gildenliste")]),
            ],
            "de",
        );
        assert_eq!(translator.t("title"), "Gildenliste");
        assert_eq!(translator.t("sort"), "Sort");
        assert_eq!(translator.t("no_such_key"), "no_such_key");
    }

    #[test]
    fn test_unknown_language_uses_english() {
        let translator = Translator::new(vec![catalog("en", &[("title", "Guild List")])], "xx");
        assert_eq!(translator.language(), "en");
        assert_eq!(translator.t("title"), "Guild List");
    }

    #[test]
    fn test_set_language_is_case_insensitive_and_keeps_current_on_miss() {
        let mut translator = Translator::new(
            vec![catalog("en", &[]), catalog("fr", &[])],
            "en",
        );
        assert!(translator.set_language("FR"));
        assert_eq!(translator.language(), "fr");
        assert!(!translator.set_language("zz"));
        assert_eq!(translator.language(), "fr");
    }

    #[test]
    fn test_no_catalogs_returns_keys() {
        let translator = Translator::new(Vec::new(), "en");
        assert_eq!(translator.t("title"), "title");
        assert_eq!(translator.language(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_missing_code_rejected() {
        let toml = "[locale]\nname = \"Nameless\"\n";
        let path = PathBuf::from("bad.toml");
        let def = parse_catalog_toml(toml, &path).unwrap();
        let err = validate(def, &path, false).unwrap_err();
        assert!(matches!(
            err,
            LocaleError::MissingField {
                field: "locale.code",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let path = PathBuf::from("broken.toml");
        assert!(matches!(
            parse_catalog_toml("[locale\ncode=", &path),
            Err(LocaleError::TomlParse { .. })
        ));
    }
}
