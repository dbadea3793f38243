//! Webhook error types for LemonSqueezy webhook handling.
//!
//! Status codes determine the provider's redelivery behaviour: anything other
//! than 2xx is retried, so only authenticity and structural failures are
//! surfaced as errors. Internal failures are acknowledged.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that occur during webhook processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// No signing secret configured for this deployment.
    #[error("Webhook secret not configured")]
    SecretNotConfigured,

    /// Signature header missing or not matching the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Body is not JSON, or lacks `meta.event_name` or `data`.
    #[error("Invalid event structure: {0}")]
    InvalidEventStructure(String),

    /// Unexpected failure while applying the event.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebhookError {
    /// Maps the error to the HTTP status returned to the provider.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::SecretNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidEventStructure(_) => StatusCode::BAD_REQUEST,
            // Acknowledged so the provider does not redeliver forever.
            WebhookError::Internal(_) => StatusCode::OK,
        }
    }

    /// True when the delivery is still reported as received.
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, WebhookError::Internal(_))
    }

    /// Message exposed in the response body.
    pub fn public_message(&self) -> String {
        match self {
            WebhookError::SecretNotConfigured => "Webhook secret not configured".to_string(),
            WebhookError::InvalidSignature => "Invalid signature".to_string(),
            WebhookError::InvalidEventStructure(_) => "Invalid event structure".to_string(),
            WebhookError::Internal(message) => message.clone(),
        }
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        WebhookError::Internal(err.to_string())
    }
}
