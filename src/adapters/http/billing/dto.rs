//! Webhook response bodies.

use serde::Serialize;

/// Acknowledgement returned for every delivery the provider should not retry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebhookAck {
    pub received: bool,
    /// Set when an internal failure was swallowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self {
            received: true,
            error: None,
        }
    }

    pub fn received_with_error(error: impl Into<String>) -> Self {
        Self {
            received: true,
            error: Some(error.into()),
        }
    }
}
