// SPDX-License-Identifier: MPL-2.0
//! Picks the language a caller should translate into when none is given.

use crate::config::{Config, DEFAULT_LANGUAGE};
use unic_langid::LanguageIdentifier;

/// Returns the language subtag of a locale string (`"fr-CA"` → `"fr"`).
///
/// Returns `None` for strings that are not valid language identifiers or
/// carry no language (`"und"`).
pub fn language_subtag(locale: &str) -> Option<String> {
    let lang: LanguageIdentifier = locale.replace('_', "-").parse().ok()?;
    if lang.language.is_empty() {
        return None;
    }
    Some(lang.language.as_str().to_string())
}

/// Resolves the language to use, in order:
/// 1. `cli_lang`, as given
/// 2. the configured `default_language`
/// 3. the OS locale's language subtag
/// 4. `"en"`
pub fn resolve_language(cli_lang: Option<&str>, config: &Config) -> String {
    resolve_with_os_locale(cli_lang, config, sys_locale::get_locale())
}

fn resolve_with_os_locale(cli_lang: Option<&str>, config: &Config, os_locale: Option<String>) -> String {
    if let Some(lang) = cli_lang.filter(|lang| !lang.is_empty()) {
        return lang.to_string();
    }

    if let Some(lang) = config.general.default_language.as_deref() {
        if !lang.is_empty() {
            return lang.to_string();
        }
    }

    if let Some(lang) = os_locale.as_deref().and_then(language_subtag) {
        tracing::debug!(%lang, "using OS locale");
        return lang;
    }

    DEFAULT_LANGUAGE.to_string()
}
