//! Resolver configuration
//!
//! Configuration is plain data with sensible defaults. It can be built in
//! code, read from the `LUMEN_ENV` environment variable, or deserialized from
//! any serde format (the CLI reads the `[resolve]` table of `lumen.toml`).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable selecting the runtime mode
pub const ENV_VAR: &str = "LUMEN_ENV";

/// Settings for a style resolver
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Production mode: development diagnostics are not emitted
    pub production: bool,
    /// Log `:`-prefixed style keys that name no known interaction state
    pub warn_unknown_selectors: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            production: false,
            warn_unknown_selectors: true,
        }
    }
}

impl ResolveConfig {
    /// Development defaults
    pub fn development() -> Self {
        Self::default()
    }

    /// Production defaults
    pub fn production() -> Self {
        Self {
            production: true,
            ..Self::default()
        }
    }

    /// Read the mode from `LUMEN_ENV`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(ENV_VAR).ok().as_deref())
    }

    /// Interpret a `LUMEN_ENV` value (`None` when unset)
    pub fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            None | Some("") | Some("development") | Some("test") => Ok(Self::development()),
            Some("production") => Ok(Self::production()),
            Some(other) => Err(ConfigError::InvalidEnv {
                variable: ENV_VAR,
                value: other.to_string(),
                expected: "development, test, production",
            }),
        }
    }

    /// Whether shorthand/longhand conflicts should be reported
    pub fn diagnostics_enabled(&self) -> bool {
        !self.production
    }
}
