//! GetCreditBalanceHandler - Query handler for a signed-in user's credits.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::credits::{active_balance, CreditType};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{CreditLedger, UserDirectory};

use super::PlanCreditAllocator;

/// Query for the balance of the session user.
#[derive(Debug, Clone)]
pub struct GetCreditBalanceQuery {
    pub email: String,
    pub display_name: Option<String>,
}

/// Active credits per type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditBalanceView {
    pub user_id: UserId,
    pub balances: BTreeMap<CreditType, u64>,
}

/// Materialises the session user on first visit, granting the signup bonus,
/// then sums unexpired grants.
pub struct GetCreditBalanceHandler {
    users: Arc<dyn UserDirectory>,
    ledger: Arc<dyn CreditLedger>,
    allocator: PlanCreditAllocator,
}

impl GetCreditBalanceHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        ledger: Arc<dyn CreditLedger>,
        allocator: PlanCreditAllocator,
    ) -> Self {
        Self {
            users,
            ledger,
            allocator,
        }
    }

    pub async fn handle(&self, query: GetCreditBalanceQuery) -> Result<CreditBalanceView, DomainError> {
        let result = self
            .users
            .find_or_create_user(&query.email, query.display_name)
            .await?;
        let user_id = result.user.id;

        if result.created {
            tracing::info!(user_id = %user_id, "New user registered from session");
            self.allocator.grant_signup_credits(&user_id).await?;
        }

        let grants = self.ledger.grants_for_user(&user_id).await?;
        Ok(CreditBalanceView {
            user_id,
            balances: active_balance(&grants, &Timestamp::now()),
        })
    }
}
