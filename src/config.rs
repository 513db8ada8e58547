//! Handler configuration.
//!
//! Everything here is optional: with no config file the AWS SDK default
//! chain supplies region and credentials. The endpoint override exists for
//! pointing the client at a local stand-in during development.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// AWS region override. Falls back to the SDK default chain.
    #[serde(default)]
    pub region: Option<String>,

    /// Elastic Transcoder endpoint override.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./cfn-transcoder.toml",
        "~/.config/cfn-transcoder/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}
