// SPDX-License-Identifier: MPL-2.0
//! In-memory shape of the loaded locale data.
//!
//! ```text
//! LocaleTree   scope    -> LanguageSet
//! LanguageSet  language -> MessageTable
//! MessageTable key      -> Entry (message template | endpoint table)
//! ```

use std::collections::HashMap;

/// Scope that holds application-wide messages.
pub const DEFAULT_SCOPE: &str = "default";

/// Messages of one endpoint, keyed by sub-key.
pub type EndpointTable = HashMap<String, String>;

/// One value of a [`MessageTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A message template.
    Message(String),
    /// Messages nested under an endpoint key such as `.edit`.
    Endpoint(EndpointTable),
}

/// Messages of one language within one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    entries: HashMap<String, Entry>,
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Returns the template stored under `key`, if it is a message.
    pub fn message(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Entry::Message(template)) => Some(template),
            _ => None,
        }
    }

    /// Returns the endpoint table stored under `key`, if it is one.
    pub fn endpoint(&self, key: &str) -> Option<&EndpointTable> {
        match self.entries.get(key) {
            Some(Entry::Endpoint(table)) => Some(table),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Adds a lower-cased alias for every key, keeping the original keys.
    ///
    /// Keys of endpoint tables get aliases as well. An alias never replaces
    /// a key that already exists verbatim.
    pub fn add_lowercase_aliases(&mut self) {
        for entry in self.entries.values_mut() {
            if let Entry::Endpoint(table) = entry {
                alias_keys(table);
            }
        }
        alias_keys(&mut self.entries);
    }
}

fn alias_keys<V: Clone>(map: &mut HashMap<String, V>) {
    let aliases: Vec<(String, V)> = map
        .iter()
        .filter_map(|(key, value)| {
            let lower = key.to_lowercase();
            (lower != *key && !map.contains_key(&lower)).then(|| (lower, value.clone()))
        })
        .collect();
    for (alias, value) in aliases {
        map.entry(alias).or_insert(value);
    }
}

impl FromIterator<(String, Entry)> for MessageTable {
    fn from_iter<I: IntoIterator<Item = (String, Entry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Message tables of one scope, keyed by lower-cased language code.
pub type LanguageSet = HashMap<String, MessageTable>;

/// Every loaded scope.
#[derive(Debug, Clone, Default)]
pub struct LocaleTree {
    scopes: HashMap<String, LanguageSet>,
}

impl LocaleTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self, name: &str) -> Option<&LanguageSet> {
        self.scopes.get(name)
    }

    pub fn contains_scope(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    pub fn table(&self, scope: &str, language: &str) -> Option<&MessageTable> {
        self.scopes.get(scope).and_then(|set| set.get(language))
    }

    /// Stores `table`, replacing any previous table for the pair as a whole.
    pub fn insert(&mut self, scope: &str, language: &str, table: MessageTable) {
        self.scopes
            .entry(scope.to_string())
            .or_default()
            .insert(language.to_string(), table);
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
