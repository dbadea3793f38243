//! In-memory user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{normalize_email, SubscriptionUpdate, User};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{FindOrCreateResult, UserDirectory};

/// Users held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing user.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn get(&self, user_id: &UserId) -> Option<User> {
        self.users.read().await.get(user_id).cloned()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_or_create_user(
        &self,
        email: &str,
        display_name: Option<String>,
    ) -> Result<FindOrCreateResult, DomainError> {
        let email = normalize_email(email)?;
        let mut users = self.users.write().await;

        if let Some(user) = users.values().find(|u| u.email == email) {
            return Ok(FindOrCreateResult {
                user: user.clone(),
                created: false,
            });
        }

        let user = User::new(&email, display_name)?;
        users.insert(user.id, user.clone());
        Ok(FindOrCreateResult {
            user,
            created: true,
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email)?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.lemon_squeezy_subscription_id.as_deref() == Some(subscription_id))
            .cloned())
    }

    async fn update_user_subscription(
        &self,
        user_id: &UserId,
        update: SubscriptionUpdate,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or_else(|| user_not_found(user_id))?;
        user.apply(&update);
        Ok(())
    }

    async fn downgrade_user_to_default_plan(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or_else(|| user_not_found(user_id))?;
        user.downgrade_to_default_plan();
        Ok(())
    }
}

fn user_not_found(user_id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User {} not found", user_id))
}
