//! Test helpers shared across module tests.
#![cfg(test)]

use std::collections::HashMap;

use crate::locale::Locale;
use crate::store::{
    SourceError,
    TranslationSource,
};

/// In-memory translation source: locale code → raw JSON text.
#[derive(Debug, Clone)]
pub(crate) struct MemorySource {
    /// Tables by locale code.
    tables: HashMap<String, String>,
}

impl MemorySource {
    /// Source over `(locale, json_text)` pairs.
    pub(crate) fn new(tables: &[(&str, &str)]) -> Self {
        Self {
            tables: tables
                .iter()
                .map(|(locale, text)| ((*locale).to_string(), (*text).to_string()))
                .collect(),
        }
    }
}

impl TranslationSource for MemorySource {
    async fn fetch(&self, locale: &Locale) -> Result<Option<String>, SourceError> {
        Ok(self.tables.get(locale.as_str()).cloned())
    }
}
