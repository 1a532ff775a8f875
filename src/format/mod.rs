// SPDX-License-Identifier: MPL-2.0
//! Message template formatting.
//!
//! A translated template is formatted in two passes:
//!
//! 1. **Positional** (`%s`, `%d`, `%.2f`, ...) substitution from an ordered
//!    argument list. Any mismatch between the template and the arguments is
//!    an error the caller must handle.
//! 2. **Named** (`{user}`, `{count:>4}`) substitution from a name → value map.
//!    A placeholder without a supplied value aborts this pass only: the text
//!    produced by the positional pass is returned as-is.
//!
//! Templates that contain neither `%` nor braces come back unchanged no
//! matter which arguments are supplied.

mod named;
mod percent;

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A single value that can be substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl FormatArg {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatArg::Str(_) => "string",
            FormatArg::Int(_) => "integer",
            FormatArg::Float(_) => "float",
            FormatArg::Bool(_) => "boolean",
        }
    }

    /// Parses a command-line style value: integers, then floats, then
    /// `true`/`false`, falling back to a plain string.
    pub fn parse_lossy(raw: &str) -> Self {
        if let Ok(v) = raw.parse::<i64>() {
            return FormatArg::Int(v);
        }
        if let Ok(v) = raw.parse::<f64>() {
            return FormatArg::Float(v);
        }
        match raw {
            "true" => FormatArg::Bool(true),
            "false" => FormatArg::Bool(false),
            _ => FormatArg::Str(raw.to_string()),
        }
    }
}

/// Renders the value the way `%s` and a bare `{name}` show it: floats keep a
/// fractional part (`2.0`) and booleans are capitalized (`True`).
impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Str(s) => f.write_str(s),
            FormatArg::Int(v) => write!(f, "{}", v),
            FormatArg::Float(v) => f.write_str(&float_repr(*v)),
            FormatArg::Bool(true) => f.write_str("True"),
            FormatArg::Bool(false) => f.write_str("False"),
        }
    }
}

/// Shortest round-trip text for `value`, always with a fractional part or an
/// exponent. Exponents are used below `1e-4` and from `1e16` up.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let raw = format!("{:e}", value);
        let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{exp_sign}{:02}", exp.unsigned_abs());
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Str(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        FormatArg::Str(value.clone())
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Int(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        FormatArg::Int(i64::from(value))
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        FormatArg::Int(i64::from(value))
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Float(value)
    }
}

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        FormatArg::Bool(value)
    }
}

/// Named arguments keyed by placeholder name.
pub type NamedArgs = HashMap<String, FormatArg>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("not enough arguments for format string")]
    NotEnoughArguments,

    #[error("not all arguments converted during string formatting")]
    TooManyArguments,

    #[error("%{conversion} format requires a number, not {found}")]
    TypeMismatch {
        conversion: char,
        found: &'static str,
    },

    #[error("unsupported format character '{0}'")]
    UnsupportedConversion(char),

    #[error("incomplete format")]
    IncompleteSpec,

    #[error("no value supplied for placeholder '{{{0}}}'")]
    MissingNamed(String),

    #[error("single '{{' or '}}' encountered in format string")]
    UnbalancedBrace,

    #[error("invalid format specifier '{0}'")]
    InvalidSpec(String),
}

/// Formats `template` with positional then named arguments.
///
/// Positional errors propagate. A missing named value is logged and the
/// positional result is returned unchanged; other named-pass errors propagate.
pub fn combine(
    template: &str,
    args: &[FormatArg],
    named: &NamedArgs,
) -> Result<String, FormatError> {
    let msg = percent::apply(template, args)?;
    match named::apply(&msg, named) {
        Ok(formatted) => Ok(formatted),
        Err(FormatError::MissingNamed(name)) => {
            tracing::trace!(placeholder = %name, "named argument missing, keeping template text");
            Ok(msg)
        }
        Err(err) => Err(err),
    }
}
