//! The active translation table.
//!
//! One table is active at a time, keyed by the loaded locale. A load either
//! replaces the table wholesale or fails and leaves the previous table
//! intact; there is no partial merging.

mod source;

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

pub use source::{
    DirSource,
    SourceError,
    TranslationSource,
};

use crate::locale::Locale;

/// Errors from loading a translation table.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Neither the requested locale nor the default had a resource.
    #[error("translations unavailable: no resource for {locale:?} or default {default:?}")]
    TranslationsUnavailable {
        /// The originally requested locale.
        locale: String,
        /// The default locale that was tried as fallback.
        default: String,
    },

    /// The source failed while resolving a resource.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A resource existed but was not valid JSON.
    #[error("failed to parse translation table for {locale}: {source}")]
    Parse {
        /// Locale whose table failed to parse.
        locale: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Holder of the active locale's key → template mapping.
#[derive(Debug)]
pub struct TranslationStore<S> {
    /// Asset resolver.
    source: S,
    /// Fallback target when a locale has no resource.
    default_locale: Locale,
    /// Locale of the active table, once a load has succeeded.
    active_locale: Option<Locale>,
    /// The active table.
    table: HashMap<String, String>,
}

impl<S: TranslationSource> TranslationStore<S> {
    /// Empty store over a source; no table is active until [`Self::load`].
    pub fn new(source: S, default_locale: Locale) -> Self {
        Self { source, default_locale, active_locale: None, table: HashMap::new() }
    }

    /// Load and activate the table for `locale`.
    ///
    /// When the locale has no resource, the default locale is tried exactly
    /// once; the fallback is a separate explicit step, not recursion, so a
    /// misconfigured supported set can never loop.
    ///
    /// # Errors
    /// - [`StoreError::TranslationsUnavailable`] when neither resource exists
    /// - [`StoreError::Parse`] / [`StoreError::Source`] propagated from the
    ///   attempted load, leaving the previous table intact
    pub async fn load(&mut self, locale: &Locale) -> Result<(), StoreError> {
        if self.try_load(locale).await? {
            return Ok(());
        }
        tracing::warn!(%locale, "no translation file found for locale");

        if locale != &self.default_locale {
            let default = self.default_locale.clone();
            if self.try_load(&default).await? {
                return Ok(());
            }
            tracing::warn!(locale = %default, "no translation file found for default locale");
        }

        Err(StoreError::TranslationsUnavailable {
            locale: locale.to_string(),
            default: self.default_locale.to_string(),
        })
    }

    /// Fetch, parse and activate one locale's table.
    ///
    /// Returns `Ok(false)` when the locale has no resource. The active
    /// table is only replaced after a fully successful parse.
    async fn try_load(&mut self, locale: &Locale) -> Result<bool, StoreError> {
        let Some(text) = self.source.fetch(locale).await? else {
            return Ok(false);
        };

        let json: Value = serde_json::from_str(&text)
            .map_err(|source| StoreError::Parse { locale: locale.to_string(), source })?;

        self.table = flatten_table(&json);
        self.active_locale = Some(locale.clone());
        tracing::debug!(%locale, keys = self.table.len(), "translation table loaded");
        Ok(true)
    }

    /// Locale of the active table, if any load has succeeded.
    #[must_use]
    pub fn active_locale(&self) -> Option<&Locale> {
        self.active_locale.as_ref()
    }

    /// Translate a key with no parameters.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translate a key, substituting `{{name}}` placeholders.
    ///
    /// A missing key, or a key mapped to an empty template, is logged and
    /// returned verbatim, so a lookup never yields an empty string. Every
    /// occurrence of a supplied placeholder is replaced; placeholders
    /// without a matching parameter stay as-is.
    #[must_use]
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.table.get(key).filter(|t| !t.is_empty()) else {
            tracing::warn!(key, "translation key not found");
            return key.to_string();
        };
        interpolate(template, params)
    }
}

/// Replace `{{name}}` placeholders in a template.
fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (name, value) in params {
        let placeholder = format!("{{{{{name}}}}}");
        text = text.replace(&placeholder, value);
    }
    text
}

/// Flatten a parsed translation table into dot-separated keys.
///
/// The page's tables are flat key → string mappings; nested objects and
/// arrays still flatten cleanly (`"a": {"b": "x"}` becomes `a.b`) instead
/// of being dropped.
fn flatten_table(json: &Value) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_value(json, None, &mut result);
    result
}

/// Recursive step of [`flatten_table`].
fn flatten_value(json: &Value, prefix: Option<&str>, result: &mut HashMap<String, String>) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
                flatten_value(value, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_value(value, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}
