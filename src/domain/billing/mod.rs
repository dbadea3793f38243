//! Billing domain module.
//!
//! Payment-provider events and their authenticity checks.

mod event;
mod webhook_errors;
mod webhook_verifier;

pub use event::{BillingEvent, BillingEventKind, EventData};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{compute_signature, WebhookSignatureVerifier};
