//! Settings for the paywall screen.

mod loader;
mod types;

pub use loader::load_settings;
pub use types::{
    ConfigError,
    PageSettings,
    ValidationError,
};
