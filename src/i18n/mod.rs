// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support backed by YAML locale files.
//!
//! This module loads translations from a directory tree of YAML files and
//! resolves hierarchical keys against them.
//!
//! # Features
//!
//! - Scoped locale files: `<root>/<scope>/<language>.yml`
//! - Five key syntaxes (`name`, `.name`, `..name`, `scope.name`,
//!   `scope.endpoint.name`), see [`key`]
//! - Fallback to a secondary language, then to the raw key
//! - Incremental reload driven by file modification times
//! - Optional case-insensitive lookups
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use yaml_lens::i18n::{LocaleStore, StoreOptions, TranslateOptions, Translator};
//!
//! let store = LocaleStore::open("locales", StoreOptions::default())?;
//! let translator = Translator::new(Arc::new(store));
//!
//! let text = translator.t("hello_world", &TranslateOptions::new().named("user", "Lix"))?;
//! println!("{text}");
//! # Ok::<(), yaml_lens::error::Error>(())
//! ```

pub mod key;
pub mod language;
pub mod store;
pub mod table;
pub mod translator;
pub mod yaml;

pub use key::KeyFormat;
pub use language::{language_subtag, resolve_language};
pub use store::{LoadReport, LocaleStore, ReloadPolicy, StoreOptions};
pub use table::{Entry, EndpointTable, LanguageSet, LocaleTree, MessageTable, DEFAULT_SCOPE};
pub use translator::{NoRequest, RequestContext, StaticRequest, TranslateOptions, Translator};
