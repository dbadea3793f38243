//! In-memory credit ledger.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::credits::CreditGrant;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::CreditLedger;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCreditLedger {
    grants: Arc<RwLock<Vec<CreditGrant>>>,
}

impl InMemoryCreditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every grant recorded, across users.
    pub async fn all_grants(&self) -> Vec<CreditGrant> {
        self.grants.read().await.clone()
    }
}

#[async_trait]
impl CreditLedger for InMemoryCreditLedger {
    async fn record_grant(&self, grant: &CreditGrant) -> Result<(), DomainError> {
        self.grants.write().await.push(grant.clone());
        Ok(())
    }

    async fn grants_for_user(&self, user_id: &UserId) -> Result<Vec<CreditGrant>, DomainError> {
        let grants = self.grants.read().await;
        Ok(grants
            .iter()
            .filter(|g| &g.user_id == user_id)
            .cloned()
            .collect())
    }
}
