// GuildView - app/locale_mgr.rs
//
// Loads locale catalogs from both built-in sources (embedded in the binary)
// and user TOML files on disk. A user catalog with the same code as a
// built-in one overrides its strings key by key; new codes add languages.

use crate::core::locale::{self, Catalog};
use crate::util::constants;
use crate::util::error::LocaleError;
use std::path::Path;

/// Load all available catalogs: built-in first, then user overrides.
///
/// Invalid user catalogs are logged and skipped. Returns the merged list
/// and any non-fatal errors encountered.
pub fn load_all_catalogs(user_locale_dir: Option<&Path>) -> (Vec<Catalog>, Vec<LocaleError>) {
    let mut catalogs = locale::load_builtin_catalogs();
    let mut errors = Vec::new();

    tracing::info!(builtin_count = catalogs.len(), "Loaded built-in locales");

    if let Some(dir) = user_locale_dir {
        if dir.is_dir() {
            let (user_catalogs, user_errors) = load_user_catalogs(dir);
            errors.extend(user_errors);

            for user in user_catalogs {
                if let Some(existing) = catalogs.iter_mut().find(|c| c.code == user.code) {
                    tracing::info!(
                        code = %user.code,
                        path = ?user.source_path,
                        "User locale overrides built-in"
                    );
                    existing.name = user.name;
                    existing.strings.extend(user.strings);
                    existing.is_builtin = false;
                    existing.source_path = user.source_path;
                } else {
                    tracing::info!(
                        code = %user.code,
                        path = ?user.source_path,
                        "Loaded user-defined locale"
                    );
                    catalogs.push(user);
                }
            }
        } else {
            tracing::debug!(
                dir = %dir.display(),
                "User locale directory does not exist (skipping)"
            );
        }
    }

    if catalogs.len() > constants::MAX_LOCALES {
        tracing::warn!(
            count = catalogs.len(),
            max = constants::MAX_LOCALES,
            "Too many locales loaded, truncating"
        );
        errors.push(LocaleError::TooManyLocales {
            count: catalogs.len(),
            max: constants::MAX_LOCALES,
        });
        catalogs.truncate(constants::MAX_LOCALES);
    }

    tracing::info!(total = catalogs.len(), "Locale loading complete");

    (catalogs, errors)
}

/// Load user catalogs from a directory, in file-name order.
fn load_user_catalogs(dir: &Path) -> (Vec<Catalog>, Vec<LocaleError>) {
    let mut catalogs = Vec::new();
    let mut errors = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(LocaleError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return (catalogs, errors);
        }
    };

    let mut paths = Vec::new();
    for entry_result in entries {
        match entry_result {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => errors.push(LocaleError::Io {
                path: dir.to_path_buf(),
                source: e,
            }),
        }
    }
    paths.sort();

    for path in paths {
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }

        let metadata = match std::fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                errors.push(LocaleError::Io { path, source: e });
                continue;
            }
        };

        if metadata.len() > constants::MAX_LOCALE_FILE_SIZE {
            errors.push(LocaleError::FileTooLarge {
                path,
                size: metadata.len(),
                max_size: constants::MAX_LOCALE_FILE_SIZE,
            });
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                errors.push(LocaleError::Io { path, source: e });
                continue;
            }
        };

        match locale::parse_catalog_toml(&content, &path)
            .and_then(|def| locale::validate(def, &path, false))
        {
            Ok(c) => catalogs.push(c),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid locale file");
                errors.push(e);
            }
        }
    }

    (catalogs, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_user_dir_gives_builtins() {
        let (catalogs, errors) = load_all_catalogs(None);
        assert!(errors.is_empty());
        assert_eq!(catalogs.len(), 3);
    }

    #[test]
    fn test_user_catalog_overrides_and_adds() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("en.toml"),
            "[locale]\ncode = \"en\"\nname = \"English (custom)\"\n\n[strings]\ntitle = \"My Guilds\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("es.toml"),
            "[locale]\ncode = \"es\"\nname = \"Español\"\n\n[strings]\ntitle = \"Gremios\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let (catalogs, errors) = load_all_catalogs(Some(dir.path()));
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(catalogs.len(), 4);

        let en = catalogs.iter().find(|c| c.code == "en").unwrap();
        assert_eq!(en.strings["title"], "My Guilds");
        // Keys not in the user file survive from the built-in catalog.
        assert_eq!(en.strings["owner"], "Owner");
        assert!(!en.is_builtin);
        assert_eq!(en.source_path.as_deref(), Some(dir.path().join("en.toml").as_path()));

        let es = catalogs.iter().find(|c| c.code == "es").unwrap();
        assert_eq!(es.source_path.as_deref(), Some(dir.path().join("es.toml").as_path()));

        let de = catalogs.iter().find(|c| c.code == "de").unwrap();
        assert!(de.is_builtin);
        assert!(de.source_path.is_none());
    }

    #[test]
    fn test_invalid_user_catalog_is_skipped_with_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[locale\n").unwrap();
        std::fs::write(dir.path().join("nameless.toml"), "[locale]\ncode = \"xx\"\n").unwrap();

        let (catalogs, errors) = load_all_catalogs(Some(dir.path()));
        assert_eq!(catalogs.len(), 3);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_missing_user_dir_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let (catalogs, errors) = load_all_catalogs(Some(&dir.path().join("absent")));
        assert!(errors.is_empty());
        assert_eq!(catalogs.len(), 3);
    }
}
