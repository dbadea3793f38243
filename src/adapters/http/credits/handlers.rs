//! HTTP handlers for credits endpoints.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::credits::{
    GetCreditBalanceHandler, GetCreditBalanceQuery, PlanCreditAllocator, QuoteCreditPriceError,
    QuoteCreditPriceHandler, QuoteCreditPriceQuery,
};
use crate::domain::credits::{CreditsConfig, CreditsError, PriceQuote};
use crate::domain::foundation::DomainError;
use crate::ports::{CreditLedger, PlanCatalog, UserDirectory};

use super::super::dto::ErrorResponse;
use super::dto::{CreditBalanceResponse, QuoteParams};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CreditsAppState {
    pub users: Arc<dyn UserDirectory>,
    pub plans: Arc<dyn PlanCatalog>,
    pub ledger: Arc<dyn CreditLedger>,
    pub config: Arc<CreditsConfig>,
}

impl CreditsAppState {
    pub fn allocator(&self) -> PlanCreditAllocator {
        PlanCreditAllocator::new(self.ledger.clone(), self.config.clone())
    }

    pub fn balance_handler(&self) -> GetCreditBalanceHandler {
        GetCreditBalanceHandler::new(self.users.clone(), self.ledger.clone(), self.allocator())
    }

    pub fn quote_handler(&self) -> QuoteCreditPriceHandler {
        QuoteCreditPriceHandler::new(self.users.clone(), self.plans.clone(), self.config.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/app/credits/balance
pub async fn get_credit_balance(
    State(state): State<CreditsAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CreditBalanceResponse>, CreditsApiError> {
    let query = GetCreditBalanceQuery {
        email: user.email,
        display_name: user.display_name,
    };

    let view = state.balance_handler().handle(query).await?;
    Ok(Json(view.into()))
}

/// GET /api/app/credits/quote
pub async fn quote_credit_price(
    State(state): State<CreditsAppState>,
    RequireAuth(user): RequireAuth,
    params: Result<Query<QuoteParams>, QueryRejection>,
) -> Result<Json<PriceQuote>, CreditsApiError> {
    let Query(params) = params.map_err(|e| CreditsApiError::InvalidQuery(e.body_text()))?;
    let query = QuoteCreditPriceQuery {
        email: user.email,
        credit_type: params.credit_type.parse()?,
        amount: params.amount,
    };

    let quote = state.quote_handler().handle(query).await?;
    Ok(Json(quote))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum CreditsApiError {
    InvalidQuery(String),
    Credits(CreditsError),
    Domain(DomainError),
}

impl From<CreditsError> for CreditsApiError {
    fn from(err: CreditsError) -> Self {
        Self::Credits(err)
    }
}

impl From<DomainError> for CreditsApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<QuoteCreditPriceError> for CreditsApiError {
    fn from(err: QuoteCreditPriceError) -> Self {
        match err {
            QuoteCreditPriceError::Credits(e) => Self::Credits(e),
            QuoteCreditPriceError::Domain(e) => Self::Domain(e),
        }
    }
}

impl IntoResponse for CreditsApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            CreditsApiError::InvalidQuery(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_QUERY", msg.clone())
            }
            CreditsApiError::Credits(err) => {
                let code = match err {
                    CreditsError::Disabled => "CREDITS_DISABLED",
                    CreditsError::UnknownCreditType(_) => "UNKNOWN_CREDIT_TYPE",
                    CreditsError::NotConfigured(_) => "CREDIT_TYPE_NOT_CONFIGURED",
                    CreditsError::BelowMinimum { .. } => "BELOW_MINIMUM",
                    CreditsError::InvalidConfig(_) => "INVALID_CREDITS_CONFIG",
                };
                let status = match err {
                    CreditsError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, code, err.to_string())
            }
            CreditsApiError::Domain(err) => {
                tracing::error!("Credits request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::with_code(code, message))).into_response()
    }
}
