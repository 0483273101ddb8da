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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Bind host must be an IP address: {0}")]
    InvalidBindHost(String),

    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),

    #[error("Invalid site base URL")]
    InvalidBaseUrl,

    #[error("{0} must use HTTPS in production")]
    MustBeHttps(&'static str),

    #[error("Add-on label and price must be configured together")]
    IncompleteAddOn,

    #[error("Invalid Stripe API key format")]
    InvalidStripeKey,

    #[error("Access token secret must be at least {0} characters")]
    SecretTooShort(usize),

    #[error("Access token TTL must be between 1 and 365 days")]
    InvalidTokenTtl,
}
