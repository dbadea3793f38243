//! Application configuration module
//!
//! Configuration is read from environment variables with the `BESIDEAI`
//! prefix, nested values separated by `__`. A `.env` file is honoured in
//! development.
//!
//! # Example
//!
//! ```no_run
//! use besideai::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod credits;
mod database;
mod error;
mod payment;
mod server;
mod site;

pub use auth::AuthConfig;
pub use credits::CreditsSettings;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use site::SiteConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// LemonSqueezy webhook settings
    #[serde(default)]
    pub payment: PaymentConfig,

    pub auth: AuthConfig,

    #[serde(default)]
    pub credits: CreditsSettings,

    #[serde(default)]
    pub site: SiteConfig,
}

impl AppConfig {
    /// Load configuration from `.env` and the environment.
    ///
    /// - `BESIDEAI__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BESIDEAI__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BESIDEAI")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.payment.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
