//! paywall-screen
//!
//! Localization pipeline for a single-page paywall screen: resolve the
//! active locale from the page address and client language, load the
//! locale's translation table, and render translated and priced content
//! into the page's element tree.

pub mod config;
pub mod constants;
pub mod dom;
pub mod locale;
pub mod page;
pub mod render;
pub mod sanitize;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use page::{
    Page,
    PageError,
    stock_document,
};
