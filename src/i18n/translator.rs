// SPDX-License-Identifier: MPL-2.0
//! Key resolution: turns a translation key into formatted, trusted text.
//!
//! Resolution never fails because something is missing. An unknown scope
//! turns the whole key into a literal template; a missing language falls back
//! to the fallback language and then to the raw key; a missing message falls
//! back to the raw key. Only formatting errors are returned to the caller.

use super::key::KeyFormat;
use super::store::LocaleStore;
use super::table::{LanguageSet, LocaleTree, MessageTable, DEFAULT_SCOPE};
use crate::config::defaults::{DEFAULT_FAILBACK, DEFAULT_LANGUAGE};
use crate::error::Result;
use crate::format::{self, FormatArg, NamedArgs};
use crate::markup::Markup;
use std::sync::Arc;

/// Values a host application supplies about the request being served.
///
/// Consulted only when needed: the language when the call does not name one,
/// and the scope/endpoint for keys that start with `.` or `..`.
pub trait RequestContext {
    /// Preferred language of the current session.
    fn language(&self) -> Option<&str> {
        None
    }

    /// Scope of the current route.
    fn scope(&self) -> Option<&str> {
        None
    }

    /// Full endpoint name of the current route, e.g. `users.edit`.
    fn endpoint(&self) -> Option<&str> {
        None
    }
}

/// No request in flight.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRequest;

impl RequestContext for NoRequest {}

/// A request context with fixed values.
#[derive(Debug, Clone, Default)]
pub struct StaticRequest {
    pub language: Option<String>,
    pub scope: Option<String>,
    pub endpoint: Option<String>,
}

impl StaticRequest {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

impl RequestContext for StaticRequest {
    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

/// Per-call resolution options.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Explicit language; overrides the request's language.
    pub lang: Option<String>,
    /// Language tried when `lang` has no table in the scope.
    pub failback: String,
    /// Positional (`%`) arguments.
    pub args: Vec<FormatArg>,
    /// Named (`{name}`) arguments.
    pub named: NamedArgs,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            lang: None,
            failback: DEFAULT_FAILBACK.to_string(),
            args: Vec::new(),
            named: NamedArgs::new(),
        }
    }
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    #[must_use]
    pub fn failback(mut self, failback: impl Into<String>) -> Self {
        self.failback = failback.into();
        self
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<FormatArg>) -> Self {
        self.args.push(value.into());
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>, value: impl Into<FormatArg>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }
}

/// Resolves keys against a shared [`LocaleStore`].
#[derive(Debug, Clone)]
pub struct Translator {
    store: Arc<LocaleStore>,
    default_language: String,
}

impl Translator {
    pub fn new(store: Arc<LocaleStore>) -> Self {
        Self {
            store,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Language used when neither the call nor the request names one.
    #[must_use]
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn store(&self) -> &Arc<LocaleStore> {
        &self.store
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Translates `text` outside of any request.
    pub fn t(&self, text: &str, options: &TranslateOptions) -> Result<Markup> {
        self.t_with(text, options, &NoRequest)
    }

    /// Translates `text`, reading language, scope and endpoint from `request`
    /// when needed.
    pub fn t_with(
        &self,
        text: &str,
        options: &TranslateOptions,
        request: &dyn RequestContext,
    ) -> Result<Markup> {
        if let Err(err) = self.store.ensure_loaded() {
            tracing::warn!(error = %err, "locale refresh failed, using cached translations");
        }

        if text.is_empty() {
            return Ok(Markup::trusted(text));
        }

        let lang = options
            .lang
            .as_deref()
            .or_else(|| request.language())
            .unwrap_or(&self.default_language);

        let lowered = self.store.ignore_case().then(|| text.to_lowercase());
        let key = lowered.as_deref().unwrap_or(text);
        let tree = self.store.read();

        let (scope, endpoint, subkey) = match KeyFormat::parse(key) {
            KeyFormat::Empty => return Ok(Markup::trusted(text)),
            KeyFormat::Plain(name) => {
                return self.plain(&tree, text, name, lang, options);
            }
            KeyFormat::EndpointRelative { subkey } => {
                let endpoint = request
                    .endpoint()
                    .map(|name| format!(".{}", name.rsplit('.').next().unwrap_or(name)));
                (request.scope(), endpoint, subkey)
            }
            KeyFormat::ScopeRelative { subkey } => (request.scope(), None, subkey),
            KeyFormat::Scoped { scope, subkey } => (Some(scope), None, subkey),
            KeyFormat::Deep {
                scope,
                endpoint,
                subkey,
            } => (Some(scope), Some(format!(".{endpoint}")), subkey),
        };

        let Some(languages) = scope.and_then(|name| tree.scope(name)) else {
            tracing::trace!(key = %text, scope = ?scope, "unknown scope, using key as template");
            return combine(text, options);
        };
        let Some(table) = resolve_language(languages, lang, &options.failback) else {
            tracing::trace!(key = %text, lang, "no table for language or fallback");
            return Ok(Markup::trusted(text));
        };

        let template = match endpoint.as_deref().and_then(|name| table.endpoint(name)) {
            Some(messages) => messages.get(subkey).map(String::as_str),
            None => table.message(subkey),
        };
        if template.is_none() {
            tracing::trace!(key = %text, lang, "missing translation");
        }
        combine(template.unwrap_or(text), options)
    }

    fn plain(
        &self,
        tree: &LocaleTree,
        text: &str,
        name: &str,
        lang: &str,
        options: &TranslateOptions,
    ) -> Result<Markup> {
        let table = tree
            .scope(DEFAULT_SCOPE)
            .and_then(|languages| resolve_language(languages, lang, &options.failback));
        let Some(table) = table else {
            tracing::trace!(key = %text, lang, "no default table for language or fallback");
            return Ok(Markup::trusted(text));
        };
        let template = table.message(name);
        if template.is_none() {
            tracing::trace!(key = %text, lang, "missing translation");
        }
        combine(template.unwrap_or(text), options)
    }
}

fn resolve_language<'t>(
    languages: &'t LanguageSet,
    lang: &str,
    failback: &str,
) -> Option<&'t MessageTable> {
    languages.get(lang).or_else(|| languages.get(failback))
}

fn combine(template: &str, options: &TranslateOptions) -> Result<Markup> {
    let text = format::combine(template, &options.args, &options.named)?;
    Ok(Markup::trusted(text))
}
