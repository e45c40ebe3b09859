//! Active-locale resolution for the page.
//!
//! Precedence: `lang` query parameter, then the client-reported language,
//! then the configured default. Resolution never fails; anything that cannot
//! be understood is logged and falls through to the next source.

use url::Url;

use super::Locale;
use crate::config::PageSettings;
use crate::constants::LANG_PARAM;

/// Resolve the active locale for the page.
///
/// `client_language` is the language the client environment reports
/// (e.g. `de-DE`); only its primary subtag is considered.
#[must_use]
pub fn resolve(
    page_url: Option<&Url>,
    client_language: Option<&str>,
    settings: &PageSettings,
) -> Locale {
    if let Some(url) = page_url
        && let Some(locale) = locale_from_url(url, settings)
    {
        return locale;
    }

    if let Some(reported) = client_language {
        match reported.parse::<Locale>() {
            Ok(locale) if settings.is_supported(locale.as_str()) => return locale,
            Ok(locale) => {
                tracing::debug!(%locale, "client language is not in the supported set");
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not parse client language");
            }
        }
    }

    settings.default_locale()
}

/// Read a supported locale from the `lang` query parameter, if any.
fn locale_from_url(url: &Url, settings: &PageSettings) -> Option<Locale> {
    let value = url
        .query_pairs()
        .find(|(key, _)| key == LANG_PARAM)
        .map(|(_, value)| value.into_owned())?;

    if !settings.is_supported(&value) {
        tracing::debug!(lang = %value, "lang parameter is not in the supported set");
        return None;
    }

    match value.parse::<Locale>() {
        Ok(locale) => Some(locale),
        Err(e) => {
            tracing::warn!(error = %e, "supported lang parameter failed to parse");
            None
        }
    }
}

/// Rewrite the page address so it always carries a supported `lang`
/// parameter. Existing unrelated parameters are preserved.
///
/// Returns whether the URL was changed.
pub fn ensure_url_has_locale(url: &mut Url, locale: &Locale, settings: &PageSettings) -> bool {
    let current = url
        .query_pairs()
        .find(|(key, _)| key == LANG_PARAM)
        .map(|(_, value)| value.into_owned());

    if let Some(value) = &current
        && settings.is_supported(value)
    {
        return false;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != LANG_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(LANG_PARAM, locale.as_str());
    }

    tracing::debug!(url = %url, %locale, "rewrote page address with resolved locale");
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn settings() -> PageSettings {
        PageSettings::default()
    }

    fn page_url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[rstest]
    #[case("en")]
    #[case("de")]
    #[case("es")]
    #[case("fr")]
    #[case("pt")]
    fn resolve_prefers_supported_lang_parameter(#[case] code: &str) {
        let url = page_url(&format!("https://example.com/paywall?lang={code}"));

        let locale = resolve(Some(&url), Some("ja-JP"), &settings());

        assert_that!(locale.as_str(), eq(code));
    }

    #[googletest::test]
    fn resolve_falls_back_to_client_language() {
        let url = page_url("https://example.com/paywall?lang=xx");

        let locale = resolve(Some(&url), Some("de-DE"), &settings());

        assert_that!(locale.as_str(), eq("de"));
    }

    #[googletest::test]
    fn resolve_ignores_unsupported_client_language() {
        let locale = resolve(None, Some("ja-JP"), &settings());

        assert_that!(locale.as_str(), eq("en"));
    }

    #[googletest::test]
    fn resolve_defaults_when_nothing_matches() {
        let locale = resolve(None, None, &settings());

        assert_that!(locale.as_str(), eq("en"));
    }

    #[googletest::test]
    fn resolve_survives_garbage_client_language() {
        let locale = resolve(None, Some("!!!"), &settings());

        assert_that!(locale.as_str(), eq("en"));
    }

    #[googletest::test]
    fn ensure_url_adds_missing_lang_parameter() {
        let mut url = page_url("https://example.com/paywall?ref=promo");
        let locale: Locale = "de".parse().unwrap();

        let changed = ensure_url_has_locale(&mut url, &locale, &settings());

        assert_that!(changed, eq(true));
        assert_that!(url.query(), some(eq("ref=promo&lang=de")));
    }

    #[googletest::test]
    fn ensure_url_replaces_unsupported_lang_parameter() {
        let mut url = page_url("https://example.com/paywall?lang=xx");
        let locale: Locale = "fr".parse().unwrap();

        let changed = ensure_url_has_locale(&mut url, &locale, &settings());

        assert_that!(changed, eq(true));
        assert_that!(url.query(), some(eq("lang=fr")));
    }

    #[googletest::test]
    fn ensure_url_keeps_supported_lang_parameter() {
        let mut url = page_url("https://example.com/paywall?lang=es");
        let locale: Locale = "en".parse().unwrap();

        let changed = ensure_url_has_locale(&mut url, &locale, &settings());

        assert_that!(changed, eq(false));
        assert_that!(url.query(), some(eq("lang=es")));
    }
}
