//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Receive timeout must be between 1 and 300 seconds")]
    InvalidReceiveTimeout,

    #[error("Processed-event retention must be between 60 seconds and 365 days")]
    InvalidRetention,

    #[error("Cleanup interval must be at least 1 second")]
    InvalidCleanupInterval,

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),
}
