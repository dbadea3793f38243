//! In-memory plan catalog.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::Plan;
use crate::domain::foundation::{DomainError, PlanId};
use crate::ports::PlanCatalog;

/// Plans held in memory, searched in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanCatalog {
    plans: Arc<RwLock<Vec<Plan>>>,
}

impl InMemoryPlanCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plans(plans: Vec<Plan>) -> Self {
        Self {
            plans: Arc::new(RwLock::new(plans)),
        }
    }

    pub async fn insert(&self, plan: Plan) {
        self.plans.write().await.push(plan);
    }
}

#[async_trait]
impl PlanCatalog for InMemoryPlanCatalog {
    async fn find_plan_by_variant_id(&self, variant_id: &str) -> Result<Option<Plan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans.iter().find(|p| p.matches_variant(variant_id)).cloned())
    }

    async fn find_plan_by_onetime_variant_id(
        &self,
        variant_id: &str,
    ) -> Result<Option<Plan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans
            .iter()
            .find(|p| p.matches_onetime_variant(variant_id))
            .cloned())
    }

    async fn find_plan_by_id(&self, plan_id: &PlanId) -> Result<Option<Plan>, DomainError> {
        let plans = self.plans.read().await;
        Ok(plans.iter().find(|p| &p.id == plan_id).cloned())
    }
}
