// SPDX-License-Identifier: MPL-2.0
//! `yaml_lens` translates hierarchical keys against a tree of YAML locale
//! files.
//!
//! Locale files live under `<root>/<scope>/<language>.yml`. Keys select a
//! scope, an optional endpoint table and a message, and the message is then
//! formatted with positional (`%s`) and named (`{name}`) arguments.
//!
//! See [`i18n`] for lookups, [`format`] for the formatting rules and
//! [`config`] for the `settings.toml` file.

#![doc(html_root_url = "https://docs.rs/yaml_lens/0.3.0")]

pub mod config;
pub mod directory_scanner;
pub mod error;
pub mod format;
pub mod i18n;
pub mod markup;
pub mod paths;

pub use error::{Error, Result};
pub use format::{FormatArg, FormatError, NamedArgs};
pub use i18n::{LocaleStore, ReloadPolicy, StoreOptions, TranslateOptions, Translator};
pub use markup::Markup;
