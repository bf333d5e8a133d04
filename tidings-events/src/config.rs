//! Dispatcher configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable selecting the [`FailurePolicy`]
pub const FAILURE_POLICY_ENV: &str = "TIDINGS_FAILURE_POLICY";

/// Environment variable toggling dispatcher logging
pub const DISPATCH_LOGGING_ENV: &str = "TIDINGS_DISPATCH_LOGGING";

/// What a broadcast does when a handler returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Run every handler, then report all failures together
    #[default]
    #[serde(alias = "continue")]
    ContinueOnError,
    /// Stop at the first failing handler and report it
    #[serde(alias = "abort")]
    AbortOnFirstError,
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" | "continue_on_error" => Ok(FailurePolicy::ContinueOnError),
            "abort" | "abort_on_first_error" => Ok(FailurePolicy::AbortOnFirstError),
            other => Err(ConfigError::InvalidValue {
                key: FAILURE_POLICY_ENV,
                value: other.to_string(),
            }),
        }
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Handler failure policy
    pub failure_policy: FailurePolicy,

    /// Enable dispatch logging
    pub enable_logging: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::ContinueOnError,
            enable_logging: true,
        }
    }
}

impl DispatcherConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Missing keys keep their default value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(FAILURE_POLICY_ENV) {
            config.failure_policy = value.parse()?;
        }

        if let Some(value) = lookup(DISPATCH_LOGGING_ENV) {
            config.enable_logging = parse_flag(DISPATCH_LOGGING_ENV, &value)?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key,
            value: other.to_string(),
        }),
    }
}

/// Dispatcher configuration builder
pub struct DispatcherConfigBuilder {
    config: DispatcherConfig,
}

impl DispatcherConfigBuilder {
    /// Create new builder with default settings
    pub fn new() -> Self {
        Self {
            config: DispatcherConfig::default(),
        }
    }

    /// Set the handler failure policy
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Enable/disable logging
    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.config.enable_logging = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> DispatcherConfig {
        self.config
    }
}

impl Default for DispatcherConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}
