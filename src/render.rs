//! Rendering translated content into the document.

use crate::constants::{
    I18N_ATTR,
    PRICING,
    SELECTORS,
    TRANSLATION_KEYS,
};
use crate::dom::{
    self,
    Document,
    ElementId,
};
use crate::store::{
    TranslationSource,
    TranslationStore,
};

/// Translate every element carrying the `data-i18n` attribute.
///
/// Best-effort, all-elements pass: an element with an empty key is logged
/// and skipped, and no single element can abort the rest. Translated text
/// is written as markup (through the sanitizer). Returns how many elements
/// were updated.
pub fn render_all<S: TranslationSource>(doc: &mut Document, store: &TranslationStore<S>) -> usize {
    let targets = dom::query_selector_all(doc, SELECTORS.i18n_elements);
    let mut updated = 0;

    for target in targets {
        let Some(key) = doc.get(target).and_then(|el| el.attr(I18N_ATTR).map(str::to_string))
        else {
            continue;
        };

        if key.is_empty() {
            tracing::warn!(?target, "element has data-i18n attribute but no key value");
            continue;
        }

        let translated = store.t(&key);
        if dom::set_html(doc, Some(target), &translated) {
            updated += 1;
        } else {
            tracing::error!(?target, %key, "error updating element");
        }
    }

    updated
}

/// Render the three pricing strings into their fixed selectors.
///
/// All-or-nothing: when any of the three nodes is missing the document is
/// left untouched and `false` is returned. The per-year line is written as
/// plain text; the two per-week lines carry a `<br>` and are written as
/// markup.
pub fn render_dynamic_content<S: TranslationSource>(
    doc: &mut Document,
    store: &TranslationStore<S>,
) -> bool {
    let price_per_year = dom::query_selector(doc, SELECTORS.price_per_year);
    let price_yearly_per_week = dom::query_selector(doc, SELECTORS.price_yearly_per_week);
    let price_per_week = dom::query_selector(doc, SELECTORS.price_per_week);

    if price_per_year.is_none() || price_yearly_per_week.is_none() || price_per_week.is_none() {
        tracing::warn!("pricing nodes missing, dynamic content not rendered");
        return false;
    }

    let yearly_per_year_text =
        store.t_with(TRANSLATION_KEYS.just_price_per_year, &[("price", PRICING.yearly_per_year)]);
    let _ = dom::set_text_content(doc, price_per_year, &yearly_per_year_text);

    let yearly_per_week_text =
        store.t_with(TRANSLATION_KEYS.price_per_week, &[("price", PRICING.yearly_per_week)]);
    let _ = dom::set_html(doc, price_yearly_per_week, &yearly_per_week_text);

    let weekly_price_text =
        store.t_with(TRANSLATION_KEYS.price_per_week, &[("price", PRICING.weekly_price)]);
    let _ = dom::set_html(doc, price_per_week, &weekly_price_text);

    true
}

/// Outcome of dispatching a click on a wired control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Whether the control's default navigation was suppressed.
    pub default_prevented: bool,
}

/// Wiring between the document and the page's single interactive control.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageBindings {
    /// The continue control, when present in the document.
    continue_button: Option<ElementId>,
}

impl PageBindings {
    /// Locate and bind the continue control.
    #[must_use]
    pub fn wire(doc: &Document) -> Self {
        let continue_button = dom::query_selector(doc, SELECTORS.continue_button);
        if continue_button.is_none() {
            tracing::warn!("continue button not found, no click handling wired");
        }
        Self { continue_button }
    }

    /// Whether a continue control was found.
    #[must_use]
    pub fn has_continue_button(&self) -> bool {
        self.continue_button.is_some()
    }

    /// Dispatch a click on the continue control.
    ///
    /// Default navigation is always prevented and the click is handed off
    /// to `on_continue`. Returns `None` when no control was wired.
    pub fn click_continue(&self, on_continue: impl FnOnce()) -> Option<ClickOutcome> {
        let _ = self.continue_button?;
        on_continue();
        Some(ClickOutcome { default_prevented: true })
    }
}
