// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, loaded from and saved to a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Default and fallback language
//! - `[locales]` - Locale root, reload mode and case handling
//!
//! ```toml
//! [general]
//! default_language = "en"
//! failback = "en"
//!
//! [locales]
//! path = "locales"
//! reload = "interval"
//! reload_interval_ms = 2000
//! ignore_case = false
//! ```
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `YAML_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use yaml_lens::config;
//! use std::path::Path;
//!
//! let (config, _warning) = config::load();
//! let translator = config.translator(Path::new("/srv/app"))?;
//! # Ok::<(), yaml_lens::error::Error>(())
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::i18n::{LocaleStore, ReloadPolicy, StoreOptions, TranslateOptions, Translator};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Enums
// =============================================================================

/// When locale files are rescanned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReloadMode {
    #[default]
    Never,
    EveryCall,
    Interval,
    Manual,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Language settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Language used when neither the call nor the request names one.
    /// Unset means the binary consults the OS locale before `"en"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,

    /// Language tried when the requested one has no table.
    #[serde(default = "default_failback", skip_serializing_if = "Option::is_none")]
    pub failback: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_language: None,
            failback: default_failback(),
        }
    }
}

/// Locale file settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalesConfig {
    /// Locale root; relative paths are resolved against the application root.
    #[serde(default = "default_locale_dir", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Reload mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reload: Option<ReloadMode>,

    /// Rescan interval for `reload = "interval"` (milliseconds).
    #[serde(
        default = "default_reload_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub reload_interval_ms: Option<u64>,

    /// Whether lookups ignore key case.
    #[serde(default = "default_ignore_case", skip_serializing_if = "Option::is_none")]
    pub ignore_case: Option<bool>,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            path: default_locale_dir(),
            reload: Some(ReloadMode::default()),
            reload_interval_ms: default_reload_interval_ms(),
            ignore_case: default_ignore_case(),
        }
    }
}

impl LocalesConfig {
    /// Reload policy for the store, with the interval clamped to its bounds.
    pub fn reload_policy(&self) -> ReloadPolicy {
        match self.reload.unwrap_or_default() {
            ReloadMode::Never => ReloadPolicy::Never,
            ReloadMode::EveryCall => ReloadPolicy::EveryCall,
            ReloadMode::Manual => ReloadPolicy::Manual,
            ReloadMode::Interval => {
                let ms = self
                    .reload_interval_ms
                    .unwrap_or(DEFAULT_RELOAD_INTERVAL_MS)
                    .clamp(MIN_RELOAD_INTERVAL_MS, MAX_RELOAD_INTERVAL_MS);
                ReloadPolicy::Interval(Duration::from_millis(ms))
            }
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            reload: self.reload_policy(),
            ignore_case: self.ignore_case.unwrap_or(DEFAULT_IGNORE_CASE),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub locales: LocalesConfig,
}

impl Config {
    /// Locale root directory for an application rooted at `app_root`.
    pub fn locale_root(&self, app_root: &Path) -> PathBuf {
        let dir = self.locales.path.as_deref().unwrap_or(DEFAULT_LOCALE_DIR);
        app_root.join(dir)
    }

    pub fn default_language(&self) -> &str {
        self.general
            .default_language
            .as_deref()
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn failback(&self) -> &str {
        self.general.failback.as_deref().unwrap_or(DEFAULT_FAILBACK)
    }

    /// Base call options carrying the configured failback language.
    pub fn translate_options(&self) -> TranslateOptions {
        TranslateOptions::new().failback(self.failback())
    }

    /// Opens the locale store described by this config and wraps it in a
    /// translator.
    pub fn translator(&self, app_root: &Path) -> Result<Translator> {
        let store = LocaleStore::open(self.locale_root(app_root), self.locales.store_options())?;
        Ok(Translator::new(Arc::new(store)).with_default_language(self.default_language()))
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_failback() -> Option<String> {
    Some(DEFAULT_FAILBACK.to_string())
}

fn default_locale_dir() -> Option<String> {
    Some(DEFAULT_LOCALE_DIR.to_string())
}

fn default_reload_interval_ms() -> Option<u64> {
    Some(DEFAULT_RELOAD_INTERVAL_MS)
}

fn default_ignore_case() -> Option<bool> {
    Some(DEFAULT_IGNORE_CASE)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "using default config");
                    return (Config::default(), Some(err.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
