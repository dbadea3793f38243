//! PlanCreditAllocator - grants configured credits on plan changes and signup.

use std::sync::Arc;

use crate::domain::account::Plan;
use crate::domain::credits::{AllocationSet, CreditGrant, CreditsConfig};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::CreditLedger;

/// Origin id recorded on signup bonus grants.
pub const SIGNUP_ORIGIN: &str = "signup";

/// Records credit grants according to the credits catalogue.
///
/// Every call records fresh grants. Callers that replay the same payment
/// will grant twice.
#[derive(Clone)]
pub struct PlanCreditAllocator {
    ledger: Arc<dyn CreditLedger>,
    config: Arc<CreditsConfig>,
}

impl PlanCreditAllocator {
    pub fn new(ledger: Arc<dyn CreditLedger>, config: Arc<CreditsConfig>) -> Self {
        Self { ledger, config }
    }

    /// Grants the allocation configured for the plan's codename.
    pub async fn grant_plan_credits(
        &self,
        user_id: &UserId,
        plan: &Plan,
        origin_id: &str,
    ) -> Result<Vec<CreditGrant>, DomainError> {
        let allocation = self.config.plan_allocation(&plan.codename);
        if allocation.is_empty() {
            tracing::debug!("No credit allocation for plan {}", plan.codename);
            return Ok(Vec::new());
        }
        self.record(user_id, &allocation, origin_id).await
    }

    /// Grants the signup bonus.
    pub async fn grant_signup_credits(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CreditGrant>, DomainError> {
        let allocation = self.config.signup_allocation();
        self.record(user_id, &allocation, SIGNUP_ORIGIN).await
    }

    async fn record(
        &self,
        user_id: &UserId,
        allocation: &AllocationSet,
        origin_id: &str,
    ) -> Result<Vec<CreditGrant>, DomainError> {
        let now = Timestamp::now();
        let mut grants = Vec::with_capacity(allocation.len());

        for (credit_type, rule) in allocation {
            let grant = CreditGrant::issue(*user_id, *credit_type, rule, origin_id, now)?;
            self.ledger.record_grant(&grant).await?;
            tracing::info!(
                user_id = %user_id,
                credit_type = %credit_type,
                amount = grant.amount,
                origin_id,
                "Credits granted"
            );
            grants.push(grant);
        }

        Ok(grants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCreditLedger;
    use crate::domain::credits::CreditType;

    fn allocator(config: CreditsConfig) -> (PlanCreditAllocator, InMemoryCreditLedger) {
        let ledger = InMemoryCreditLedger::new();
        let allocator = PlanCreditAllocator::new(Arc::new(ledger.clone()), Arc::new(config));
        (allocator, ledger)
    }

    #[tokio::test]
    async fn premium_plan_grants_image_and_video() {
        let (allocator, ledger) = allocator(CreditsConfig::default());
        let user_id = UserId::new();
        let plan = Plan::new("Premium", "premium");

        let grants = allocator
            .grant_plan_credits(&user_id, &plan, "sub_1")
            .await
            .unwrap();

        assert_eq!(grants.len(), 2);
        let stored = ledger.grants_for_user(&user_id).await.unwrap();
        assert_eq!(stored, grants);
        assert!(stored.iter().all(|g| g.origin_id == "sub_1"));
        assert!(stored.iter().all(|g| g.expires_at.is_some()));
    }

    #[tokio::test]
    async fn plan_without_allocation_records_nothing() {
        let (allocator, ledger) = allocator(CreditsConfig::default());

        let grants = allocator
            .grant_plan_credits(&UserId::new(), &Plan::new("Free", "free"), "sub_1")
            .await
            .unwrap();

        assert!(grants.is_empty());
        assert!(ledger.all_grants().await.is_empty());
    }

    #[tokio::test]
    async fn signup_bonus_is_tagged_with_signup_origin() {
        let (allocator, _ledger) = allocator(CreditsConfig::default());

        let grants = allocator.grant_signup_credits(&UserId::new()).await.unwrap();

        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].credit_type, CreditType::ImageGeneration);
        assert_eq!(grants[0].amount, 50);
        assert_eq!(grants[0].origin_id, SIGNUP_ORIGIN);
    }

    #[tokio::test]
    async fn out_of_range_expiry_fails_without_recording() {
        let mut config = CreditsConfig::default();
        for allocation in config.on_plan_change.values_mut().flat_map(|set| set.values_mut()) {
            allocation.expiry_days = Some(u32::MAX);
        }
        let (allocator, ledger) = allocator(config);

        let err = allocator
            .grant_plan_credits(&UserId::new(), &Plan::new("Premium", "premium"), "sub_1")
            .await
            .unwrap_err();

        assert_eq!(err.code, crate::domain::foundation::ErrorCode::ValidationFailed);
        assert!(ledger.all_grants().await.is_empty());
    }

    #[tokio::test]
    async fn repeated_calls_grant_again() {
        let (allocator, ledger) = allocator(CreditsConfig::default());
        let user_id = UserId::new();
        let plan = Plan::new("Professional", "professional");

        allocator.grant_plan_credits(&user_id, &plan, "sub_1").await.unwrap();
        allocator.grant_plan_credits(&user_id, &plan, "sub_1").await.unwrap();

        assert_eq!(ledger.grants_for_user(&user_id).await.unwrap().len(), 2);
    }
}
