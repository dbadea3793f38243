//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

const MIN_SESSION_SECRET_LEN: usize = 32;

/// Session token and admin settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 key used to sign session tokens
    pub session_secret: SecretString,

    /// Comma-separated list of emails allowed into `/super-admin`
    #[serde(default)]
    pub super_admin_emails: String,
}

impl AuthConfig {
    /// Admin emails, trimmed and lowercased. Blank entries are skipped.
    pub fn super_admin_list(&self) -> Vec<String> {
        parse_email_list(&self.super_admin_emails)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.session_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SESSION_SECRET"));
        }
        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ValidationError::SessionSecretTooShort(MIN_SESSION_SECRET_LEN));
        }
        if let Some(bad) = self.super_admin_list().into_iter().find(|e| !e.contains('@')) {
            return Err(ValidationError::InvalidAdminEmail(bad));
        }
        Ok(())
    }
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
