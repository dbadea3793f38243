//! QuoteCreditPriceHandler - prices a credit purchase for the session user.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::credits::{CreditType, CreditsConfig, CreditsError, PriceQuote};
use crate::domain::foundation::DomainError;
use crate::ports::{PlanCatalog, UserDirectory};

#[derive(Debug, Clone)]
pub struct QuoteCreditPriceQuery {
    pub email: String,
    pub credit_type: CreditType,
    pub amount: u64,
}

#[derive(Debug, Error)]
pub enum QuoteCreditPriceError {
    #[error(transparent)]
    Credits(#[from] CreditsError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Resolves the user's plan codename so plan-based rates apply.
pub struct QuoteCreditPriceHandler {
    users: Arc<dyn UserDirectory>,
    plans: Arc<dyn PlanCatalog>,
    config: Arc<CreditsConfig>,
}

impl QuoteCreditPriceHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        plans: Arc<dyn PlanCatalog>,
        config: Arc<CreditsConfig>,
    ) -> Self {
        Self {
            users,
            plans,
            config,
        }
    }

    pub async fn handle(
        &self,
        query: QuoteCreditPriceQuery,
    ) -> Result<PriceQuote, QuoteCreditPriceError> {
        let plan = match self.users.find_user_by_email(&query.email).await? {
            Some(user) => match user.plan_id {
                Some(plan_id) => self.plans.find_plan_by_id(&plan_id).await?,
                None => None,
            },
            None => None,
        };

        let codename = plan.as_ref().map(|p| p.codename.as_str());
        Ok(self.config.quote(query.credit_type, query.amount, codename)?)
    }
}
