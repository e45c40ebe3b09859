//! Document model and safe access helpers.
//!
//! The helpers here mirror how the page code is allowed to touch the
//! document: lookups degrade to "nothing found" on bad selectors, and
//! mutations report success instead of failing. Markup always passes
//! through the sanitizer on its way in.

mod document;
mod selector;

pub use document::{
    Content,
    Document,
    ElementData,
    ElementId,
};
pub use selector::{
    Selector,
    SelectorError,
};

use crate::sanitize::sanitize;

/// First element matching `selector`, in document order.
///
/// An invalid selector is logged and treated as matching nothing.
#[must_use]
pub fn query_selector(doc: &Document, selector: &str) -> Option<ElementId> {
    query_selector_all(doc, selector).into_iter().next()
}

/// All elements matching `selector`, in document order.
///
/// An invalid selector is logged and yields an empty result.
#[must_use]
pub fn query_selector_all(doc: &Document, selector: &str) -> Vec<ElementId> {
    let parsed = match Selector::parse(selector) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(selector, error = %e, "error querying selector");
            return Vec::new();
        }
    };

    doc.all_elements()
        .into_iter()
        .filter(|id| doc.get(*id).is_some_and(|el| parsed.matches(el)))
        .collect()
}

/// Set an element's plain-text content.
///
/// Returns false without touching the document when the target is absent.
pub fn set_text_content(doc: &mut Document, target: Option<ElementId>, text: &str) -> bool {
    let Some(id) = target else {
        return false;
    };
    doc.set_text(id, text)
}

/// Set an element's content as markup, sanitized first.
///
/// Returns false without touching the document when the target is absent.
pub fn set_html(doc: &mut Document, target: Option<ElementId>, html: &str) -> bool {
    let Some(id) = target else {
        return false;
    };
    doc.set_markup(id, &sanitize(html))
}
