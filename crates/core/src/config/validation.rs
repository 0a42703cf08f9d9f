//! Configuration validation rules.
//!
//! This module provides validation logic for `ForgeConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::ForgeConfig;
use thiserror::Error;

/// Configuration and client construction errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ForgeConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `base_url` is empty, unparsable, or not http(s)
    /// - `timeout_ms` is less than 100ms or exceeds 1 hour
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid { field: "base_url".into(), reason: "must not be empty".into() });
        }

        let parsed = url::Url::parse(base_url)
            .map_err(|e| ConfigError::Invalid { field: "base_url".into(), reason: e.to_string() })?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::Invalid {
                    field: "base_url".into(),
                    reason: format!("unsupported scheme: {scheme}"),
                });
            }
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 3_600_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 1 hour (3600000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            tracing::warn!(
                base_url = %self.base_url,
                "base_url carries a query or fragment; endpoint paths are appended after it"
            );
        }

        Ok(())
    }
}
