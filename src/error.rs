// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use thiserror::Error;

use crate::format::FormatError;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    /// A single locale file could not be read as a message table.
    #[error("Locale Error: {}: {message}", path.display())]
    LocaleParse { path: PathBuf, message: String },

    /// Positional arguments did not fit the template, or the template's
    /// braces were unbalanced.
    #[error("Format Error: {0}")]
    Format(#[from] FormatError),
}

impl Error {
    /// Builds a [`Error::LocaleParse`] for `path`.
    pub fn locale_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::LocaleParse {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
