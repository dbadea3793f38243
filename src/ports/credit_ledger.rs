//! Credit ledger port.
//!
//! Append-only store of credit grants. Grants are never updated or removed.

use async_trait::async_trait;

use crate::domain::credits::CreditGrant;
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Appends a grant.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn record_grant(&self, grant: &CreditGrant) -> Result<(), DomainError>;

    /// All grants ever recorded for a user, oldest first, including expired.
    async fn grants_for_user(&self, user_id: &UserId) -> Result<Vec<CreditGrant>, DomainError>;
}
