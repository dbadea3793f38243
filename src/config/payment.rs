//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::billing::WebhookSignatureVerifier;

/// Payment configuration (LemonSqueezy)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Webhook signing secret. May be absent outside production; deliveries
    /// are then answered with 500.
    pub lemon_squeezy_webhook_secret: Option<SecretString>,
}

impl PaymentConfig {
    /// Verifier for inbound deliveries, `None` when no usable secret is set.
    pub fn webhook_verifier(&self) -> Option<WebhookSignatureVerifier> {
        self.lemon_squeezy_webhook_secret
            .clone()
            .and_then(WebhookSignatureVerifier::new)
    }

    fn has_webhook_secret(&self) -> bool {
        self.lemon_squeezy_webhook_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().trim().is_empty())
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production && !self.has_webhook_secret() {
            return Err(ValidationError::WebhookSecretRequired);
        }
        Ok(())
    }
}
