//! Client configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FORGE_*)
//! 2. TOML config file (if FORGE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Address of a locally running rendering server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default HTTP timeout in milliseconds (2 minutes).
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("forge-rs/", env!("CARGO_PKG_VERSION"));

/// Configuration for a rendering server client.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FORGE_*)
/// 2. TOML config file (if FORGE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Base address of the rendering server.
    ///
    /// Set via FORGE_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via FORGE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every request.
    ///
    /// Set via FORGE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_ms: default_timeout_ms(), user_agent: default_user_agent() }
    }
}

impl ForgeConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `FORGE_`
    /// 2. TOML file from `FORGE_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("FORGE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::prefixed("FORGE_").map(|key| key.as_str().to_lowercase().into()));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        tracing::debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "loaded forge client configuration");

        Ok(config)
    }
}
