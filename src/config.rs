//! Configuration management for Warden.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WardenError};
use crate::ratelimit::{LimitPolicy, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};

/// Prefix for environment overrides, e.g. `WARDEN__RATE_LIMITING__MAX_REQUESTS`.
const ENV_PREFIX: &str = "WARDEN";

/// Main configuration for Warden.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,

    /// Crypto and sanitisation defaults
    #[serde(default)]
    pub security: SecurityConfig,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitingConfig {
    /// Requests admitted per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// How often idle identifiers are evicted, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_ms: default_window_ms(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl RateLimitingConfig {
    /// Validated limit policy described by this section.
    pub fn policy(&self) -> Result<LimitPolicy> {
        LimitPolicy::from_millis(self.max_requests, self.window_ms)
            .map_err(|e| WardenError::Config(format!("rate_limiting: {}", e)))
    }

    /// Interval between idle-eviction sweeps.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn default_max_requests() -> u32 {
    DEFAULT_MAX_REQUESTS
}

fn default_window_ms() -> u64 {
    DEFAULT_WINDOW.as_millis() as u64
}

fn default_sweep_interval() -> u64 {
    60
}

/// Defaults for the crypto and sanitisation helpers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Random token length in bytes
    #[serde(default = "default_token_length")]
    pub token_length: usize,

    /// PBKDF2 rounds for password hashing
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Characters kept by input sanitisation
    #[serde(default = "default_sanitize_max_length")]
    pub sanitize_max_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            token_length: default_token_length(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
            sanitize_max_length: default_sanitize_max_length(),
        }
    }
}

fn default_token_length() -> usize {
    crate::crypto::DEFAULT_TOKEN_LENGTH
}

fn default_pbkdf2_iterations() -> u32 {
    crate::crypto::PBKDF2_ITERATIONS
}

fn default_sanitize_max_length() -> usize {
    crate::sanitize::DEFAULT_MAX_INPUT_LENGTH
}

impl WardenConfig {
    /// Load configuration from an optional file, layered with `WARDEN__*`
    /// environment variables. Without a file, environment values override the
    /// built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path));
        }
        let config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: WardenConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, layered with `WARDEN__*` environment
    /// variables.
    pub fn from_file(path: &str) -> Result<Self> {
        Self::load(Some(path))
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: WardenConfig = serde_yaml::from_str(yaml)
            .map_err(|e| WardenError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would produce a degenerate limiter.
    pub fn validate(&self) -> Result<()> {
        self.rate_limiting.policy()?;
        if self.rate_limiting.sweep_interval_secs == 0 {
            return Err(WardenError::Config(
                "rate_limiting: sweep_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.security.pbkdf2_iterations == 0 {
            return Err(WardenError::Config(
                "security: pbkdf2_iterations must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
