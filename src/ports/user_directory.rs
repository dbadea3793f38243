//! User directory port.
//!
//! Lookup, lazy creation and subscription updates of user accounts.
//! Emails passed in are normalised by implementations before matching.

use async_trait::async_trait;

use crate::domain::account::{SubscriptionUpdate, User};
use crate::domain::foundation::{DomainError, UserId};

/// Result of `find_or_create_user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOrCreateResult {
    pub user: User,
    /// True when the account did not exist before this call.
    pub created: bool,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the user with this email, creating one if absent.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the email is malformed
    /// - `DatabaseError` on persistence failure
    async fn find_or_create_user(
        &self,
        email: &str,
        display_name: Option<String>,
    ) -> Result<FindOrCreateResult, DomainError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Finds the user holding this external subscription id.
    async fn find_user_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Applies a partial update of the billing fields.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no user has this id
    async fn update_user_subscription(
        &self,
        user_id: &UserId,
        update: SubscriptionUpdate,
    ) -> Result<(), DomainError>;

    /// Reverts the user to the default (no-plan) state.
    async fn downgrade_user_to_default_plan(&self, user_id: &UserId) -> Result<(), DomainError>;
}
