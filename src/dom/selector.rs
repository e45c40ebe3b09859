//! Minimal selector parsing.
//!
//! Supports the forms the page actually uses: `#id`, `.class`, `tag`,
//! `[attr]`, and `[attr=value]`. Anything else is an enumerated parse
//! failure rather than a silent mismatch.

use thiserror::Error;

use super::document::ElementData;

/// Errors from parsing a selector string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    /// The selector was empty.
    #[error("selector is empty")]
    Empty,

    /// The `[...]` form was not closed.
    #[error("unclosed attribute selector: {selector:?}")]
    UnclosedAttribute {
        /// The rejected selector.
        selector: String,
    },

    /// Combinators, pseudo-classes and other unsupported syntax.
    #[error("unsupported selector syntax: {selector:?}")]
    Unsupported {
        /// The rejected selector.
        selector: String,
    },
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag`
    Tag(String),
    /// `[attr]` or `[attr=value]`
    Attr {
        /// Attribute name.
        name: String,
        /// Required value, or `None` for presence-only matching.
        value: Option<String>,
    },
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    /// [`SelectorError`] for empty, unclosed, or unsupported syntax.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        if let Some(rest) = input.strip_prefix('#') {
            return simple_name(rest, input).map(Self::Id);
        }
        if let Some(rest) = input.strip_prefix('.') {
            return simple_name(rest, input).map(Self::Class);
        }
        if let Some(rest) = input.strip_prefix('[') {
            let Some(inner) = rest.strip_suffix(']') else {
                return Err(SelectorError::UnclosedAttribute { selector: input.to_string() });
            };
            return parse_attr(inner, input);
        }

        simple_name(input, input).map(|tag| Self::Tag(tag.to_ascii_lowercase()))
    }

    /// Whether an element matches this selector.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Tag(tag) => element.tag() == tag,
            Self::Attr { name, value } => match value {
                Some(expected) => element.attr(name) == Some(expected.as_str()),
                None => element.attr(name).is_some(),
            },
        }
    }
}

/// Validate a bare name (tag, id, or class token).
fn simple_name(name: &str, selector: &str) -> Result<String, SelectorError> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(name.to_string())
    } else {
        Err(SelectorError::Unsupported { selector: selector.to_string() })
    }
}

/// Parse the inside of a `[...]` selector.
fn parse_attr(inner: &str, selector: &str) -> Result<Selector, SelectorError> {
    match inner.split_once('=') {
        Some((name, value)) => {
            let name = simple_name(name.trim(), selector)?;
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            Ok(Selector::Attr { name, value: Some(value.to_string()) })
        }
        None => {
            let name = simple_name(inner.trim(), selector)?;
            Ok(Selector::Attr { name, value: None })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("#app", Selector::Id("app".to_string()))]
    #[case(".price-per-year", Selector::Class("price-per-year".to_string()))]
    #[case("main", Selector::Tag("main".to_string()))]
    #[case("MAIN", Selector::Tag("main".to_string()))]
    #[case("[data-i18n]", Selector::Attr { name: "data-i18n".to_string(), value: None })]
    #[case(
        "[lang=en]",
        Selector::Attr { name: "lang".to_string(), value: Some("en".to_string()) }
    )]
    #[case(
        "[lang=\"en\"]",
        Selector::Attr { name: "lang".to_string(), value: Some("en".to_string()) }
    )]
    fn parse_supported_forms(#[case] input: &str, #[case] expected: Selector) {
        assert_that!(Selector::parse(input).unwrap(), eq(&expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("[data-i18n")]
    #[case("div > span")]
    #[case(".a.b")]
    #[case("#")]
    fn parse_rejects_unsupported_forms(#[case] input: &str) {
        assert_that!(Selector::parse(input), err(anything()));
    }
}
