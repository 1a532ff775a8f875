// SPDX-License-Identifier: MPL-2.0
//! Classification of translation keys.
//!
//! | Key                  | Variant             | Looks up                              |
//! |----------------------|---------------------|---------------------------------------|
//! | `name`, `name.`      | `Plain`             | `default → lang → name`               |
//! | `..name`             | `EndpointRelative`  | `<request scope> → lang → .<endpoint> → name` |
//! | `.name`              | `ScopeRelative`     | `<request scope> → lang → name`       |
//! | `users.name`         | `Scoped`            | `users → lang → name`                 |
//! | `users.edit.name`    | `Deep`              | `users → lang → .edit → name`         |

/// A parsed translation key. Borrowed sub-slices of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat<'a> {
    Empty,
    Plain(&'a str),
    EndpointRelative {
        subkey: &'a str,
    },
    ScopeRelative {
        subkey: &'a str,
    },
    Scoped {
        scope: &'a str,
        subkey: &'a str,
    },
    /// `endpoint` is stored without its leading dot.
    Deep {
        scope: &'a str,
        endpoint: &'a str,
        subkey: &'a str,
    },
}

impl<'a> KeyFormat<'a> {
    pub fn parse(text: &'a str) -> Self {
        if text.is_empty() {
            return KeyFormat::Empty;
        }

        let dots = text.matches('.').count();
        if dots == 0 || (dots == 1 && text.ends_with('.')) {
            return KeyFormat::Plain(text);
        }

        if let Some(subkey) = text.strip_prefix("..") {
            return KeyFormat::EndpointRelative { subkey };
        }
        if let Some(subkey) = text.strip_prefix('.') {
            return KeyFormat::ScopeRelative { subkey };
        }

        let (scope, rest) = text.split_once('.').unwrap_or((text, ""));
        if dots == 1 {
            return KeyFormat::Scoped {
                scope,
                subkey: rest,
            };
        }
        let (endpoint, subkey) = rest.split_once('.').unwrap_or((rest, ""));
        KeyFormat::Deep {
            scope,
            endpoint,
            subkey,
        }
    }
}
