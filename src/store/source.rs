//! Translation asset resolution.
//!
//! The store treats asset lookup as a black box: given a locale, a source
//! either produces the raw JSON text of that locale's table or reports that
//! no such resource exists.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use globset::GlobMatcher;
use thiserror::Error;

use crate::config::PageSettings;
use crate::locale::Locale;

/// Errors from a translation source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The translation file glob could not be compiled.
    #[error("invalid translation file pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// A translation file exists but could not be read.
    #[error("failed to read translation file {path:?}: {source}")]
    Io {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying read error.
        #[source]
        source: std::io::Error,
    },
}

/// Resolver of per-locale translation resources.
pub trait TranslationSource {
    /// Fetch the raw JSON text for a locale.
    ///
    /// `Ok(None)` means the locale has no translation resource; read
    /// failures on an existing resource are errors.
    fn fetch(
        &self,
        locale: &Locale,
    ) -> impl Future<Output = Result<Option<String>, SourceError>> + Send;
}

/// Directory of `<locale>.json` files.
#[derive(Debug, Clone)]
pub struct DirSource {
    /// Directory holding the files.
    dir: PathBuf,
    /// Glob a candidate file name must match.
    matcher: GlobMatcher,
}

impl DirSource {
    /// Source reading from `dir`, restricted to names matching `pattern`.
    ///
    /// # Errors
    /// [`SourceError::Pattern`] when the glob does not compile.
    pub fn new(dir: impl Into<PathBuf>, pattern: &str) -> Result<Self, SourceError> {
        let matcher = globset::Glob::new(pattern)?.compile_matcher();
        Ok(Self { dir: dir.into(), matcher })
    }

    /// Source configured from page settings.
    ///
    /// # Errors
    /// [`SourceError::Pattern`] when the configured glob does not compile.
    pub fn from_settings(settings: &PageSettings) -> Result<Self, SourceError> {
        Self::new(settings.locales_dir.clone(), &settings.translation_file_pattern)
    }

    /// The directory this source reads from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TranslationSource for DirSource {
    async fn fetch(&self, locale: &Locale) -> Result<Option<String>, SourceError> {
        let file_name = format!("{locale}.json");
        if !self.matcher.is_match(&file_name) {
            tracing::warn!(%file_name, "translation file name rejected by pattern");
            return Ok(None);
        }

        let path = self.dir.join(&file_name);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SourceError::Io { path, source: e }),
        }
    }
}
