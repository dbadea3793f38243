//! HTTP adapter for billing webhooks.
//!
//! - `POST /api/webhooks/lemonsqueezy` - LemonSqueezy deliveries, HMAC signed

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{BillingAppState, SIGNATURE_HEADER};
pub use routes::billing_router;
