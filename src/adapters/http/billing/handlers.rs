//! HTTP handlers for billing webhooks.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::billing::BillingEventReconciler;
use crate::application::handlers::credits::PlanCreditAllocator;
use crate::domain::billing::{WebhookError, WebhookSignatureVerifier};
use crate::ports::{PlanCatalog, UserDirectory};

use super::super::dto::ErrorResponse;
use super::dto::WebhookAck;

/// Header carrying the hex HMAC-SHA256 of the raw body.
pub const SIGNATURE_HEADER: &str = "x-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies of the webhook endpoint.
#[derive(Clone)]
pub struct BillingAppState {
    /// `None` when no signing secret is configured.
    pub verifier: Option<WebhookSignatureVerifier>,
    pub users: Arc<dyn UserDirectory>,
    pub plans: Arc<dyn PlanCatalog>,
    pub allocator: PlanCreditAllocator,
}

impl BillingAppState {
    pub fn reconciler(&self) -> BillingEventReconciler {
        BillingEventReconciler::new(
            self.verifier.clone(),
            self.users.clone(),
            self.plans.clone(),
            self.allocator.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/webhooks/lemonsqueezy
pub async fn handle_lemonsqueezy_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let outcome = state
        .reconciler()
        .reconcile(&body, signature)
        .await
        .inspect_err(|e| {
            if e.is_acknowledged() {
                tracing::error!("Webhook processing failed: {}", e);
            }
        })?;
    tracing::debug!(?outcome, "Webhook delivery reconciled");

    Ok(Json(WebhookAck::received()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Converts reconciliation failures into provider-facing responses.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let message = self.0.public_message();

        if self.0.is_acknowledged() {
            return (status, Json(WebhookAck::received_with_error(message))).into_response();
        }
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
