//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::WeftConfig;
use std::path::Path;

/// Loads and validates `<project_dir>/weft.toml`.
pub fn load_config(project_dir: &Path) -> Result<WeftConfig, ConfigError> {
    let config_path = project_dir.join("weft.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `weft.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<WeftConfig, ConfigError> {
    let config: WeftConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &WeftConfig) -> Result<(), ConfigError> {
    if config.netlist.error_limit == Some(0) {
        return Err(ConfigError::ValidationError(
            "netlist.error_limit must be positive".to_string(),
        ));
    }
    Ok(())
}
