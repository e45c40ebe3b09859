//! Page initialization: the full locale → load → render pipeline.

use thiserror::Error;
use url::Url;

use crate::config::PageSettings;
use crate::constants::{
    LINKS,
    SELECTORS,
};
use crate::dom::Document;
use crate::locale::{
    self,
    Locale,
};
use crate::render::{
    self,
    ClickOutcome,
    PageBindings,
};
use crate::store::{
    StoreError,
    TranslationSource,
    TranslationStore,
};

/// Errors surfaced by page initialization.
///
/// Everything recoverable is logged and absorbed inside the pipeline; only
/// "cannot render localized content at all" reaches the caller.
#[derive(Error, Debug)]
pub enum PageError {
    /// No translation table could be activated, not even the default's.
    #[error("cannot render localized content: {0}")]
    TranslationsUnavailable(#[source] StoreError),
}

/// The paywall page: settings, translation store, and wiring state.
///
/// An explicit context object; callers hold exactly one per page and pass
/// the document and address in rather than sharing hidden global state.
#[derive(Debug)]
pub struct Page<S> {
    /// Validated settings.
    settings: PageSettings,
    /// The translation store, empty until initialization.
    store: TranslationStore<S>,
    /// Event wiring, empty until initialization.
    bindings: PageBindings,
    /// Guard against duplicate initialization.
    initialized: bool,
    /// Locale the page resolved to.
    resolved_locale: Option<Locale>,
}

impl<S: TranslationSource> Page<S> {
    /// Fresh, uninitialized page over a translation source.
    pub fn new(settings: PageSettings, source: S) -> Self {
        let default_locale = settings.default_locale();
        Self {
            settings,
            store: TranslationStore::new(source, default_locale),
            bindings: PageBindings::default(),
            initialized: false,
            resolved_locale: None,
        }
    }

    /// Run the whole pipeline once.
    ///
    /// Resolves the locale from the page address and client language,
    /// rewrites the address to carry it, stamps it on the document root,
    /// loads the translation table (with its one-shot default fallback),
    /// translates every tagged element, renders the pricing strings, and
    /// wires the continue control.
    ///
    /// Idempotent: repeated calls are short-circuited. The initialized flag
    /// is set even when loading fails, so a broken asset set cannot cause
    /// retry loops.
    ///
    /// # Errors
    /// [`PageError::TranslationsUnavailable`] when no table could be
    /// activated at all; the page then stays in its untranslated state.
    pub async fn initialize(
        &mut self,
        doc: &mut Document,
        url: &mut Url,
        client_language: Option<&str>,
    ) -> Result<(), PageError> {
        if self.initialized {
            tracing::debug!("page already initialized, skipping");
            return Ok(());
        }
        self.initialized = true;

        let resolved = locale::resolve(Some(url), client_language, &self.settings);
        let _ = locale::ensure_url_has_locale(url, &resolved, &self.settings);
        stamp_document_locale(doc, &resolved);
        self.resolved_locale = Some(resolved.clone());

        if let Err(e) = self.store.load(&resolved).await {
            tracing::error!(error = %e, locale = %resolved, "failed to load translations");
            return Err(PageError::TranslationsUnavailable(e));
        }

        let updated = render::render_all(doc, &self.store);
        tracing::debug!(updated, "translated tagged elements");

        if !render::render_dynamic_content(doc, &self.store) {
            tracing::warn!("pricing content left unrendered");
        }

        self.bindings = PageBindings::wire(doc);
        Ok(())
    }

    /// Whether [`Self::initialize`] has run (successfully or not).
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The locale the page resolved to during initialization.
    #[must_use]
    pub fn resolved_locale(&self) -> Option<&Locale> {
        self.resolved_locale.as_ref()
    }

    /// The translation store (for ad-hoc lookups after initialization).
    #[must_use]
    pub fn store(&self) -> &TranslationStore<S> {
        &self.store
    }

    /// Dispatch a click on the continue control.
    ///
    /// Prevents default navigation and hands off to a placeholder
    /// acknowledgment. Replace the body of the closure when real purchase
    /// navigation exists.
    pub fn click_continue(&self) -> Option<ClickOutcome> {
        self.bindings.click_continue(|| {
            tracing::info!("continue clicked");
        })
    }
}

/// Stamp the resolved locale on the document root.
fn stamp_document_locale(doc: &mut Document, locale: &Locale) {
    let root = doc.root();
    if !doc.set_attr(root, "lang", locale.as_str())
        || !doc.set_attr(root, "data-locale", locale.as_str())
    {
        tracing::error!(%locale, "error updating document lang attribute");
    }
}

/// Build the stock paywall document.
///
/// Every visible string is tagged with `data-i18n`; the key doubles as the
/// default-locale text. Selectors match [`SELECTORS`].
#[must_use]
pub fn stock_document() -> Document {
    let mut doc = Document::new("main");
    let root = doc.root();
    let _ = doc.set_id(root, "app");

    let title = doc.append_child(root, "h1");
    let _ = doc.set_attr(title, "data-i18n", "Unlock Premium Access");

    let subtitle = doc.append_child(root, "p");
    let _ = doc.add_class(subtitle, "subtitle");
    let _ = doc.set_attr(subtitle, "data-i18n", "Get unlimited access to all features");

    let features = doc.append_child(root, "ul");
    let _ = doc.add_class(features, "features");
    for key in ["No ads", "Unlimited projects", "Priority support"] {
        let item = doc.append_child(features, "li");
        let _ = doc.set_attr(item, "data-i18n", key);
    }

    let yearly = doc.append_child(root, "div");
    let _ = doc.add_class(yearly, "plan");
    let _ = doc.add_class(yearly, "plan-yearly");
    let yearly_label = doc.append_child(yearly, "span");
    let _ = doc.add_class(yearly_label, "plan-name");
    let _ = doc.set_attr(yearly_label, "data-i18n", "Yearly");
    let per_year = doc.append_child(yearly, "span");
    let _ = doc.add_class(per_year, "price-per-year");
    let yearly_per_week = doc.append_child(yearly, "span");
    let _ = doc.add_class(yearly_per_week, "price-per-week-yearly");

    let weekly = doc.append_child(root, "div");
    let _ = doc.add_class(weekly, "plan");
    let _ = doc.add_class(weekly, "plan-weekly");
    let weekly_label = doc.append_child(weekly, "span");
    let _ = doc.add_class(weekly_label, "plan-name");
    let _ = doc.set_attr(weekly_label, "data-i18n", "Weekly");
    let per_week = doc.append_child(weekly, "span");
    let _ = doc.add_class(per_week, "price-per-week");

    let button = doc.append_child(root, "a");
    let _ = doc.add_class(button, "continue-button");
    let _ = doc.set_attr(button, "href", "#");
    let _ = doc.set_attr(button, "data-i18n", "Continue");

    let footer = doc.append_child(root, "footer");
    for (class, href, key) in [
        ("terms-link", LINKS.terms, "Terms of Use"),
        ("privacy-link", LINKS.privacy, "Privacy Policy"),
        ("restore-link", LINKS.restore, "Restore"),
    ] {
        let link = doc.append_child(footer, "a");
        let _ = doc.add_class(link, class);
        let _ = doc.set_attr(link, "href", href);
        let _ = doc.set_attr(link, "data-i18n", key);
    }

    debug_assert!(crate::dom::query_selector(&doc, SELECTORS.app).is_some());
    doc
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::dom;
    use crate::test_utils::MemorySource;

    /// English and German tables covering the stock keys used in tests.
    fn sources() -> MemorySource {
        MemorySource::new(&[
            (
                "en",
                r#"{
                    "Unlock Premium Access": "Unlock Premium Access",
                    "Continue": "Continue",
                    "Just {{price}} per year": "Just {{price}} per year",
                    "{{price}} <br>per week": "{{price}} <br>per week"
                }"#,
            ),
            (
                "de",
                r#"{
                    "Unlock Premium Access": "Premium-Zugang freischalten",
                    "Continue": "Weiter",
                    "Just {{price}} per year": "Nur {{price}} pro Jahr",
                    "{{price}} <br>per week": "{{price}} <br>pro Woche"
                }"#,
            ),
        ])
    }

    fn page() -> Page<MemorySource> {
        Page::new(PageSettings::default(), sources())
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn initialize_runs_full_pipeline() {
        let mut page = page();
        let mut doc = stock_document();
        let mut address = url("https://example.com/paywall?lang=de");

        page.initialize(&mut doc, &mut address, None).await.unwrap();

        assert_that!(page.resolved_locale().map(Locale::as_str), some(eq("de")));
        let root = doc.get(doc.root()).unwrap();
        assert_that!(root.attr("lang"), some(eq("de")));
        assert_that!(root.attr("data-locale"), some(eq("de")));

        let html = doc.to_html();
        assert_that!(html, contains_substring("Premium-Zugang freischalten"));
        assert_that!(html, contains_substring("Nur $39.99 pro Jahr"));
        assert_that!(html, contains_substring("$6.99 <br>pro Woche"));
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let mut page = page();
        let mut doc = stock_document();
        let mut address = url("https://example.com/paywall");

        page.initialize(&mut doc, &mut address, Some("de-DE")).await.unwrap();
        let stamped = doc.get(doc.root()).unwrap().attr("lang").map(str::to_string);

        // A second call must not re-resolve or re-render.
        let mut other_address = url("https://example.com/paywall?lang=es");
        page.initialize(&mut doc, &mut other_address, None).await.unwrap();

        assert_that!(doc.get(doc.root()).unwrap().attr("lang").map(str::to_string), eq(&stamped));
        assert_that!(other_address.query(), some(eq("lang=es")));
    }

    #[tokio::test]
    async fn initialize_rewrites_url_with_resolved_locale() {
        let mut page = page();
        let mut doc = stock_document();
        let mut address = url("https://example.com/paywall?ref=promo");

        page.initialize(&mut doc, &mut address, Some("de")).await.unwrap();

        assert_that!(address.query(), some(eq("ref=promo&lang=de")));
    }

    #[tokio::test]
    async fn initialize_unavailable_translations_sets_flag_and_errors() {
        let mut page = Page::new(PageSettings::default(), MemorySource::new(&[]));
        let mut doc = stock_document();
        let mut address = url("https://example.com/paywall");

        let result = page.initialize(&mut doc, &mut address, None).await;

        assert_that!(result, err(anything()));
        assert_that!(page.is_initialized(), eq(true));
    }

    #[tokio::test]
    async fn click_continue_after_initialize() {
        let mut page = page();
        let mut doc = stock_document();
        let mut address = url("https://example.com/paywall");
        page.initialize(&mut doc, &mut address, None).await.unwrap();

        let outcome = page.click_continue();

        assert_that!(outcome, some(anything()));
        assert_that!(outcome.unwrap().default_prevented, eq(true));
    }

    #[googletest::test]
    fn stock_document_has_all_fixed_selectors() {
        let doc = stock_document();

        for selector in [
            crate::constants::SELECTORS.app,
            crate::constants::SELECTORS.price_per_year,
            crate::constants::SELECTORS.price_yearly_per_week,
            crate::constants::SELECTORS.price_per_week,
            crate::constants::SELECTORS.continue_button,
        ] {
            assert_that!(dom::query_selector(&doc, selector), some(anything()));
        }
    }
}
