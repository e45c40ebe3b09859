//! Locale identification and resolution.

mod resolver;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use resolver::{
    ensure_url_has_locale,
    resolve,
};

/// Errors from parsing a locale code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The input was empty or all whitespace.
    #[error("locale code is empty")]
    Empty,

    /// The primary subtag was not a short alphabetic code.
    #[error("malformed locale code: {input:?}")]
    Malformed {
        /// The rejected input.
        input: String,
    },
}

/// A short language code, e.g. `en` or `pt`.
///
/// Parsing keeps only the primary subtag (`de-DE` becomes `de`) and
/// lowercases it, matching how the page address and the client language
/// report locales with and without region variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// The code as a plain string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hard fallback used when even the configured default is unusable.
    #[must_use]
    pub fn fallback() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LocaleError::Empty);
        }

        let primary = trimmed.split(['-', '_']).next().unwrap_or(trimmed);

        let valid_length = (2..=8).contains(&primary.len());
        if !valid_length || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LocaleError::Malformed { input: s.to_string() });
        }

        Ok(Self(primary.to_ascii_lowercase()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("en", "en")]
    #[case("de-DE", "de")]
    #[case("pt_BR", "pt")]
    #[case("FR", "fr")]
    #[case("  ja  ", "ja")]
    fn parse_normalizes_codes(#[case] input: &str, #[case] expected: &str) {
        let locale: Locale = input.parse().unwrap();
        assert_that!(locale.as_str(), eq(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("e")]
    #[case("en1")]
    #[case("verylonglocale")]
    #[case("-DE")]
    fn parse_rejects_malformed_codes(#[case] input: &str) {
        let result: Result<Locale, _> = input.parse();
        assert_that!(result, err(anything()));
    }

    #[googletest::test]
    fn display_matches_as_str() {
        let locale: Locale = "es".parse().unwrap();
        assert_that!(locale.to_string(), eq("es"));
    }
}
