//! Settings types for the paywall screen.

use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;

/// One failed validation check, addressed by field path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLocales[0]")
    pub field_path: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ValidationError {
    /// Build a validation error for a field path.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors from loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more checks in [`PageSettings::validate`] failed.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file was not valid JSON.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Render a numbered list of validation errors.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for the localization pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    /// Locale codes the page ships translations for.
    pub supported_locales: Vec<String>,

    /// Locale used when detection finds nothing supported, and the
    /// fallback target when a locale's table cannot be loaded.
    pub default_locale: String,

    /// Directory holding the per-locale translation files.
    pub locales_dir: PathBuf,

    /// Glob a translation file name must match (relative to `localesDir`).
    pub translation_file_pattern: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            supported_locales: vec![
                "en".to_string(),
                "de".to_string(),
                "es".to_string(),
                "fr".to_string(),
                "pt".to_string(),
            ],
            default_locale: "en".to_string(),
            locales_dir: PathBuf::from("assets/locales"),
            translation_file_pattern: "*.json".to_string(),
        }
    }
}

impl PageSettings {
    /// Whether a raw code is in the supported set.
    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported_locales.iter().any(|supported| supported == code)
    }

    /// The configured default locale.
    ///
    /// Settings that fail [`Self::validate`] may carry a malformed default;
    /// in that case `en` is used so callers never have to handle a failure
    /// here.
    #[must_use]
    pub fn default_locale(&self) -> Locale {
        self.default_locale.parse().unwrap_or_else(|_| {
            tracing::warn!(
                default = %self.default_locale,
                "configured default locale is malformed, using \"en\""
            );
            Locale::fallback()
        })
    }

    /// # Errors
    /// - Empty supported set
    /// - Malformed locale codes
    /// - Default locale outside the supported set
    /// - Invalid or empty translation file glob
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.supported_locales.is_empty() {
            errors.push(ValidationError::new(
                "supportedLocales",
                "At least one locale is required. Example: [\"en\"]",
            ));
        }

        for (index, code) in self.supported_locales.iter().enumerate() {
            if let Err(e) = code.parse::<Locale>() {
                errors.push(ValidationError::new(
                    format!("supportedLocales[{index}]"),
                    format!("Invalid locale code '{code}': {e}"),
                ));
            }
        }

        if let Err(e) = self.default_locale.parse::<Locale>() {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!("Invalid locale code '{}': {e}", self.default_locale),
            ));
        } else if !self.is_supported(&self.default_locale) {
            errors.push(ValidationError::new(
                "defaultLocale",
                format!(
                    "The default locale '{}' must be listed in 'supportedLocales'",
                    self.default_locale
                ),
            ));
        }

        if self.translation_file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFilePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_file_pattern) {
            errors.push(ValidationError::new(
                "translationFilePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_file_pattern),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
