//! Axum router configuration for billing webhooks.

use axum::{routing::post, Router};

use super::handlers::{handle_lemonsqueezy_webhook, BillingAppState};

/// Webhook routes, mounted at `/api/webhooks`.
///
/// No session is required; deliveries are authenticated by signature.
pub fn billing_router() -> Router<BillingAppState> {
    Router::new().route("/lemonsqueezy", post(handle_lemonsqueezy_webhook))
}
