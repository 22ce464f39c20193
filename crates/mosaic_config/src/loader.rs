//! Loading `mosaic.toml` from disk or from a string.

use crate::error::ConfigError;
use crate::types::FloorplanConfig;
use std::path::Path;

/// Loads and validates a configuration file.
///
/// A missing file is not an error: all settings default.
pub fn load_config(path: &Path) -> Result<FloorplanConfig, ConfigError> {
    if !path.exists() {
        return Ok(FloorplanConfig::default());
    }
    let text = std::fs::read_to_string(path)?;
    load_config_from_str(&text)
}

/// Parses and validates configuration from a TOML string.
pub fn load_config_from_str(text: &str) -> Result<FloorplanConfig, ConfigError> {
    let config: FloorplanConfig =
        toml::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.search.validate()?;
    Ok(config)
}
