//! LemonSqueezy webhook signature verification.
//!
//! The provider signs the raw request body with HMAC-SHA256 using the
//! webhook's signing secret and sends the lowercase hex digest in the
//! `x-signature` header. There is no timestamp component, so there is no
//! replay window to enforce here.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::webhook_errors::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for LemonSqueezy webhook signatures.
#[derive(Clone)]
pub struct WebhookSignatureVerifier {
    secret: SecretString,
}

impl WebhookSignatureVerifier {
    /// Creates a verifier for the given signing secret.
    ///
    /// Returns `None` for an empty secret so that an unset environment
    /// variable behaves the same as a missing one.
    pub fn new(secret: SecretString) -> Option<Self> {
        if secret.expose_secret().is_empty() {
            return None;
        }
        Some(Self { secret })
    }

    /// Verifies `signature` against the raw `payload`.
    ///
    /// The comparison runs over the hex text in constant time, so any change
    /// to the header (including letter case) is rejected.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` - header missing or digest mismatch
    pub fn verify(&self, payload: &[u8], signature: Option<&str>) -> Result<(), WebhookError> {
        let signature = signature.ok_or(WebhookError::InvalidSignature)?;
        let expected = compute_signature(self.secret.expose_secret().as_bytes(), payload)?;

        if !constant_time_compare(expected.as_bytes(), signature.as_bytes()) {
            return Err(WebhookError::InvalidSignature);
        }
        Ok(())
    }
}

/// Computes the hex-encoded HMAC-SHA256 of `payload` keyed by `secret`.
pub fn compute_signature(secret: &[u8], payload: &[u8]) -> Result<String, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| WebhookError::Internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
