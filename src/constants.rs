//! Fixed display constants for the paywall screen.
//!
//! Price strings are display-ready (currency formatting included) and are
//! substituted into translation templates as-is.

/// Display prices for the two offered plans.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    /// Yearly plan, billed per year.
    pub yearly_per_year: &'static str,
    /// Yearly plan, broken down per week.
    pub yearly_per_week: &'static str,
    /// Weekly plan price.
    pub weekly_price: &'static str,
}

/// Prices shown on the screen.
pub const PRICING: Pricing = Pricing {
    yearly_per_year: "$39.99",
    yearly_per_week: "$0.48",
    weekly_price: "$6.99",
};

/// Selectors locating the fixed page elements.
#[derive(Debug, Clone, Copy)]
pub struct Selectors {
    /// Page root container.
    pub app: &'static str,
    /// Yearly plan, per-year price node.
    pub price_per_year: &'static str,
    /// Yearly plan, per-week price node.
    pub price_yearly_per_week: &'static str,
    /// Weekly plan price node.
    pub price_per_week: &'static str,
    /// The single call-to-action control.
    pub continue_button: &'static str,
    /// All elements opted into translation.
    pub i18n_elements: &'static str,
}

/// Selector set for the stock paywall document.
pub const SELECTORS: Selectors = Selectors {
    app: "#app",
    price_per_year: ".price-per-year",
    price_yearly_per_week: ".price-per-week-yearly",
    price_per_week: ".price-per-week",
    continue_button: ".continue-button",
    i18n_elements: "[data-i18n]",
};

/// Translation keys carrying a `{{price}}` placeholder.
#[derive(Debug, Clone, Copy)]
pub struct TranslationKeys {
    /// Yearly plan headline price line.
    pub just_price_per_year: &'static str,
    /// Per-week price line (used for both plans).
    pub price_per_week: &'static str,
}

/// Pricing template keys. Keys double as the default-locale template text.
pub const TRANSLATION_KEYS: TranslationKeys = TranslationKeys {
    just_price_per_year: "Just {{price}} per year",
    price_per_week: "{{price}} <br>per week",
};

/// Outbound footer links.
#[derive(Debug, Clone, Copy)]
pub struct Links {
    /// Terms of use.
    pub terms: &'static str,
    /// Privacy policy.
    pub privacy: &'static str,
    /// Restore purchases.
    pub restore: &'static str,
}

/// Footer link targets.
pub const LINKS: Links = Links {
    terms: "https://apple.com/",
    privacy: "https://google.com/",
    restore: "https://google.com/",
};

/// Attribute marking an element as a translation render target.
pub const I18N_ATTR: &str = "data-i18n";

/// Query parameter carrying the locale on the page address.
pub const LANG_PARAM: &str = "lang";
