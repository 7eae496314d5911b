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

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout of {request_ms}ms must exceed {needed_ms}ms, two collaborator deadlines")]
    RequestTimeoutTooShort { request_ms: u64, needed_ms: u64 },

    #[error("Invalid callback URL: {0}")]
    InvalidCallbackUrl(String),

    #[error("Callback URL must use HTTPS in production")]
    CallbackMustBeHttps,

    #[error("Invalid retry settings: {0}")]
    InvalidRetry(&'static str),

    #[error("Invalid engagement thresholds: {0}")]
    InvalidThresholds(String),

    #[error("Invalid storage settings: {0}")]
    InvalidStorage(&'static str),

    #[error("Invalid AI base URL: {0}")]
    InvalidAiBaseUrl(String),
}
