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
    #[error("Interstitial delay threshold must not be negative, got {0}")]
    NegativeDelayThreshold(i64),

    #[error("Interstitial delay threshold exceeds the 32-bit counter range")]
    DelayThresholdTooLarge,

    #[error("Pending callback timeout must be between 1 and 86400 seconds")]
    InvalidCallbackTimeout,

    #[error("Invalid provider id: {0}")]
    InvalidProviderId(String),

    #[error("Debug gesture needs at least one tap")]
    InvalidGestureTaps,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
