//! Settings file loading.

use std::path::Path;

use super::{
    ConfigError,
    PageSettings,
};

/// Name of the optional settings file next to the page assets.
const CONFIG_FILE_NAME: &str = "paywall.config.json";

/// Load settings from a root directory.
///
/// Looks for `paywall.config.json` under `root`.
///
/// # Returns
/// - `Ok(Some(settings))`: file found and parsed
/// - `Ok(None)`: no settings file, caller should use defaults
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_root(root: &Path) -> Result<Option<PageSettings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: PageSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

/// Load settings from a root directory, falling back to defaults, and
/// validate the result.
///
/// # Errors
/// - Read/parse failure of an existing settings file
/// - Validation failure
pub fn load_settings(root: Option<&Path>) -> Result<PageSettings, ConfigError> {
    let settings = match root {
        Some(root) => load_from_root(root)?.map_or_else(PageSettings::default, |loaded| {
            tracing::debug!("Loaded settings: {:?}", loaded);
            loaded
        }),
        None => PageSettings::default(),
    };

    settings.validate().map_err(ConfigError::ValidationErrors)?;

    Ok(settings)
}
