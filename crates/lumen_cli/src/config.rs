//! `lumen.toml` handling
//!
//! The CLI reads an optional `lumen.toml`. Its `[resolve]` table configures
//! the resolver; every key is optional:
//!
//! ```toml
//! [resolve]
//! production = false
//! warn_unknown_selectors = true
//! ```
//!
//! Without a file the mode comes from `LUMEN_ENV`.

use anyhow::{Context, Result};
use lumen_core::ResolveConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "lumen.toml";

/// Contents of `lumen.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LumenConfig {
    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl LumenConfig {
    /// Parse configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse lumen configuration")
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Resolve the configuration the CLI should use
    ///
    /// An explicit path must exist. Otherwise `lumen.toml` in the working
    /// directory is used if present, falling back to `LUMEN_ENV`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = Path::new(CONFIG_FILE);
        if default_path.exists() {
            return Self::load(default_path);
        }

        let resolve = ResolveConfig::from_env().context("Failed to read LUMEN_ENV")?;
        Ok(Self { resolve })
    }
}
