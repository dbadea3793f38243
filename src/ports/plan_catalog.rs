//! Plan catalog port (read side).

use async_trait::async_trait;

use crate::domain::account::Plan;
use crate::domain::foundation::{DomainError, PlanId};

/// Read-only access to purchasable plans.
#[async_trait]
pub trait PlanCatalog: Send + Sync {
    /// Plan whose monthly, yearly or one-time variant equals `variant_id`.
    async fn find_plan_by_variant_id(&self, variant_id: &str) -> Result<Option<Plan>, DomainError>;

    /// Plan whose one-time variant equals `variant_id`.
    async fn find_plan_by_onetime_variant_id(
        &self,
        variant_id: &str,
    ) -> Result<Option<Plan>, DomainError>;

    async fn find_plan_by_id(&self, plan_id: &PlanId) -> Result<Option<Plan>, DomainError>;
}
