//! Axum router configuration for credits endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_credit_balance, quote_credit_price, CreditsAppState};

/// Credits routes, mounted at `/api/app/credits`.
pub fn credits_router() -> Router<CreditsAppState> {
    Router::new()
        .route("/balance", get(get_credit_balance))
        .route("/quote", get(quote_credit_price))
}
