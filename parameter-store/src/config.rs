//! Provider configuration.
//!
//! Values come from the environment (optionally seeded from a `.env` file);
//! anything unset falls back to the AWS SDK's own resolution chain.

use crate::telemetry::TracingConfig;
use std::env;
use thiserror::Error;
use url::Url;

/// Configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid URL format
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl {
        /// Variable name
        field: String,
        /// Parse failure
        reason: String,
    },

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Variable name
        name: String,
        /// Parse failure
        reason: String,
    },
}

/// Parameter Store provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterStoreConfig {
    /// AWS region override
    pub region: Option<String>,
    /// Shared config profile override
    pub profile: Option<String>,
    /// Endpoint override, e.g. a local SSM emulator
    pub endpoint_url: Option<Url>,
    /// Logging setup
    pub tracing: TracingConfig,
}

impl ParameterStoreConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the variable that failed to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the variable that failed to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let endpoint_url = non_empty("PARAMETER_STORE_ENDPOINT_URL")
            .map(|raw| {
                Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
                    field: "PARAMETER_STORE_ENDPOINT_URL".to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let mut tracing = TracingConfig::default();
        if let Some(level) = non_empty("LOG_LEVEL") {
            tracing = tracing.with_log_level(level);
        }
        if let Some(raw) = non_empty("LOG_JSON") {
            let json: bool = raw.parse().map_err(|_| ConfigError::ParseError {
                name: "LOG_JSON".to_string(),
                reason: format!("expected true or false, got {raw}"),
            })?;
            tracing.json_output = json;
        }

        Ok(Self {
            region: non_empty("AWS_REGION"),
            profile: non_empty("AWS_PROFILE"),
            endpoint_url,
            tracing,
        })
    }

    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the endpoint override.
    #[must_use]
    pub fn with_endpoint_url(mut self, url: Url) -> Self {
        self.endpoint_url = Some(url);
        self
    }
}
