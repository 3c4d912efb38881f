//! Client configuration for the CLI: JSON file plus command line override.

use std::path::Path;

use anyhow::Context;
use log::info;
use vwi_core::config::ClientConfig;

/// Load the client configuration.
///
/// Starts from the defaults, replaces them with `path` when given, then
/// applies `api_base` on top.
pub fn load_config(path: Option<&Path>, api_base: Option<&str>) -> anyhow::Result<ClientConfig> {
    let config = match path {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            ClientConfig::from_json(&body)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ClientConfig::default(),
    };
    Ok(config.with_api_base(api_base))
}
