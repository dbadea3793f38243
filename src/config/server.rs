//! HTTP listener settings and request time limits.

use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use super::error::ValidationError;

const MAX_TIMEOUT_SECS: u64 = 300;

/// Listener, environment and timeouts. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive for the tracing subscriber.
    pub log_level: String,
    /// Upper bound on any request.
    pub request_timeout_secs: u64,
    /// Upper bound on a billing webhook delivery. The provider gives up
    /// after 20 seconds.
    pub webhook_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    /// The webhook limit sits inside the request limit, so it must not be
    /// the longer of the two.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        check_timeout("request", self.request_timeout_secs)?;
        check_timeout("webhook", self.webhook_timeout_secs)?;
        if self.webhook_timeout_secs > self.request_timeout_secs {
            return Err(ValidationError::WebhookTimeoutTooLong);
        }
        Ok(())
    }
}

fn check_timeout(name: &'static str, secs: u64) -> Result<(), ValidationError> {
    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(ValidationError::InvalidTimeout(name));
    }
    Ok(())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,besideai=debug,sqlx=warn".to_string(),
            request_timeout_secs: 30,
            webhook_timeout_secs: 20,
        }
    }
}
