// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for finding locale files.
//!
//! The locale root is laid out as `<root>/<scope>/<language>.<ext>`:
//!
//! ```text
//! locales/
//! ├── default/
//! │   ├── en.yml
//! │   └── fr.yml
//! └── users/
//!     └── en.yaml
//! ```
//!
//! Every immediate subdirectory whose name does not start with `.` is a
//! scope. Every regular file inside it with a `.yml` or `.yaml` extension is
//! a locale file; its lower-cased stem is the language code. Files directly
//! under the root and deeper subdirectories are ignored.

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extensions recognised as locale files.
pub const LOCALE_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// A locale file discovered under the locale root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    pub path: PathBuf,
    pub scope: String,
    pub language: String,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

/// Scans `root` for locale files, sorted by scope then file name.
///
/// Returns an error if `root` itself cannot be read. Scope directories that
/// cannot be read are logged and skipped.
pub fn scan_locale_root(root: &Path) -> Result<Vec<LocaleFile>> {
    let mut scopes = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %path.display(), "skipping scope with non UTF-8 name");
            continue;
        };
        if name.starts_with('.') || !path.is_dir() {
            continue;
        }
        scopes.push((name, path));
    }
    scopes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut files = Vec::new();
    for (scope, dir) in scopes {
        match scan_scope(&scope, &dir) {
            Ok(mut found) => files.append(&mut found),
            Err(err) => {
                tracing::warn!(scope = %scope, error = %err, "failed to read scope directory");
            }
        }
    }
    Ok(files)
}

fn scan_scope(scope: &str, dir: &Path) -> Result<Vec<LocaleFile>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_locale_file(&path) {
            continue;
        }
        let Some(language) = language_of(&path) else {
            continue;
        };
        let modified = entry.metadata().and_then(|m| m.modified()).ok();
        files.push(LocaleFile {
            path,
            scope: scope.to_string(),
            language,
            modified,
        });
    }
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

/// Checks if a file has a locale file extension.
pub fn is_locale_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LOCALE_EXTENSIONS.contains(&ext))
}

/// Language code carried by a locale file name (`FR.yml` → `fr`).
pub fn language_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_locale_file(root: &Path, scope: &str, name: &str) -> PathBuf {
        let dir = root.join(scope);
        fs::create_dir_all(&dir).expect("failed to create scope dir");
        let path = dir.join(name);
        fs::write(&path, "greeting: Hello\n").expect("failed to write locale file");
        path
    }

    #[test]
    fn scan_finds_locale_files_per_scope() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_locale_file(temp_dir.path(), "default", "en.yml");
        create_locale_file(temp_dir.path(), "default", "fr.yaml");
        create_locale_file(temp_dir.path(), "users", "en.yml");
        create_locale_file(temp_dir.path(), "users", "notes.txt");

        let files = scan_locale_root(temp_dir.path()).expect("failed to scan");
        let found: Vec<(&str, &str)> = files
            .iter()
            .map(|f| (f.scope.as_str(), f.language.as_str()))
            .collect();

        assert_eq!(found, vec![("default", "en"), ("default", "fr"), ("users", "en")]);
    }

    #[test]
    fn scan_skips_hidden_scopes_and_root_files() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_locale_file(temp_dir.path(), ".git", "en.yml");
        fs::write(temp_dir.path().join("en.yml"), "a: b\n").expect("failed to write file");
        create_locale_file(temp_dir.path(), "default", "en.yml");

        let files = scan_locale_root(temp_dir.path()).expect("failed to scan");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].scope, "default");
    }

    #[test]
    fn language_is_lower_cased_stem() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_locale_file(temp_dir.path(), "default", "PT_BR.yml");

        let files = scan_locale_root(temp_dir.path()).expect("failed to scan");
        assert_eq!(files[0].language, "pt_br");
    }

    #[test]
    fn scan_records_modification_time() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_locale_file(temp_dir.path(), "default", "en.yml");

        let files = scan_locale_root(temp_dir.path()).expect("failed to scan");
        assert!(files[0].modified.is_some());
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        assert!(scan_locale_root(&temp_dir.path().join("nope")).is_err());
    }

    #[test]
    fn locale_extensions_are_recognised() {
        assert!(is_locale_file(Path::new("en.yml")));
        assert!(is_locale_file(Path::new("en.yaml")));
        assert!(!is_locale_file(Path::new("en.json")));
        assert!(!is_locale_file(Path::new("en")));
    }
}
