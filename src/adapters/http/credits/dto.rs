//! Credits request and response shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::handlers::credits::CreditBalanceView;
use crate::domain::credits::CreditType;

/// Query string of the quote endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteParams {
    pub credit_type: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreditBalanceResponse {
    pub user_id: String,
    pub balances: BTreeMap<CreditType, u64>,
}

impl From<CreditBalanceView> for CreditBalanceResponse {
    fn from(view: CreditBalanceView) -> Self {
        Self {
            user_id: view.user_id.to_string(),
            balances: view.balances,
        }
    }
}
