// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Locales**: Locale root directory and case handling
//! - **Languages**: Default and fallback language codes
//! - **Reload**: Rescan interval bounds

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale root directory, relative to the application root.
pub const DEFAULT_LOCALE_DIR: &str = "locales";

/// Whether lookups ignore key case.
pub const DEFAULT_IGNORE_CASE: bool = false;

// ==========================================================================
// Language Defaults
// ==========================================================================

/// Language used when neither the call nor the request names one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language tried when the requested one has no table.
pub const DEFAULT_FAILBACK: &str = "en";

// ==========================================================================
// Reload Defaults
// ==========================================================================

/// Default rescan interval for the `interval` reload mode (milliseconds).
pub const DEFAULT_RELOAD_INTERVAL_MS: u64 = 2_000;

/// Minimum rescan interval (milliseconds).
pub const MIN_RELOAD_INTERVAL_MS: u64 = 100;

/// Maximum rescan interval (milliseconds).
pub const MAX_RELOAD_INTERVAL_MS: u64 = 3_600_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(!DEFAULT_LOCALE_DIR.is_empty());
    assert!(!DEFAULT_LANGUAGE.is_empty());
    assert!(!DEFAULT_FAILBACK.is_empty());

    assert!(MIN_RELOAD_INTERVAL_MS > 0);
    assert!(MAX_RELOAD_INTERVAL_MS >= MIN_RELOAD_INTERVAL_MS);
    assert!(DEFAULT_RELOAD_INTERVAL_MS >= MIN_RELOAD_INTERVAL_MS);
    assert!(DEFAULT_RELOAD_INTERVAL_MS <= MAX_RELOAD_INTERVAL_MS);
};
