// SPDX-License-Identifier: MPL-2.0
//! Reading YAML locale files into [`MessageTable`]s.
//!
//! A locale file is a mapping. Top-level values are either message templates
//! or a mapping of one endpoint's messages:
//!
//! ```yaml
//! greeting: Hello
//! .profile:
//!   name: Your Name
//! ```
//!
//! Numbers and booleans are kept as their textual form. Values that cannot be
//! a message (null, sequences, mappings nested deeper than one endpoint
//! level) are skipped.

use super::table::{Entry, EndpointTable, MessageTable};
use crate::error::{Error, Result};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Reads and parses the locale file at `path`.
pub fn load_table(path: &Path) -> Result<MessageTable> {
    let content = fs::read_to_string(path).map_err(|e| Error::locale_parse(path, e.to_string()))?;
    parse_table(&content).map_err(|message| Error::locale_parse(path, message))
}

/// Parses locale file content.
pub fn parse_table(content: &str) -> std::result::Result<MessageTable, String> {
    if is_blank_document(content) {
        return Ok(MessageTable::new());
    }

    let document: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let mapping = match untag(document) {
        Value::Null => return Ok(MessageTable::new()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(format!(
                "expected a mapping at the top level, found {}",
                value_kind(&other)
            ))
        }
    };

    let mut table = MessageTable::new();
    for (key, value) in mapping {
        let Some(key) = scalar_text(&key) else {
            tracing::debug!(kind = value_kind(&key), "skipping non-scalar locale key");
            continue;
        };
        match untag(value) {
            Value::Mapping(nested) => {
                table.insert(key.clone(), Entry::Endpoint(endpoint_table(&key, nested)));
            }
            other => match scalar_text(&other) {
                Some(template) => table.insert(key, Entry::Message(template)),
                None => {
                    tracing::debug!(%key, kind = value_kind(&other), "skipping locale value");
                }
            },
        }
    }
    Ok(table)
}

fn endpoint_table(endpoint: &str, mapping: serde_yaml::Mapping) -> EndpointTable {
    let mut table = EndpointTable::new();
    for (key, value) in mapping {
        match (scalar_text(&key), scalar_text(&value)) {
            (Some(key), Some(template)) => {
                table.insert(key, template);
            }
            _ => {
                tracing::debug!(%endpoint, kind = value_kind(&value), "skipping nested locale value");
            }
        }
    }
    table
}

/// Whitespace, comments and document markers only.
fn is_blank_document(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
