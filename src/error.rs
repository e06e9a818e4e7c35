//! Error types for Warden.

use thiserror::Error;

/// Main error type for Warden operations.
#[derive(Error, Debug)]
pub enum WardenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller passed a value outside the accepted contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure inside a cryptographic primitive
    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl From<::config::ConfigError> for WardenError {
    fn from(err: ::config::ConfigError) -> Self {
        WardenError::Config(err.to_string())
    }
}

/// Result type alias for Warden operations.
pub type Result<T> = std::result::Result<T, WardenError>;
