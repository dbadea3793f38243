//! Configuration error types

use thiserror::Error;

use crate::domain::credits::CreditsError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Credits configuration failed: {0}")]
    Credits(#[from] CreditsError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid {0} timeout, expected 1 to 300 seconds")]
    InvalidTimeout(&'static str),

    #[error("Webhook timeout exceeds the request timeout")]
    WebhookTimeoutTooLong,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Session secret must be at least {0} bytes")]
    SessionSecretTooShort(usize),

    #[error("Webhook secret is required in production")]
    WebhookSecretRequired,

    #[error("Invalid super admin email: {0}")]
    InvalidAdminEmail(String),
}
