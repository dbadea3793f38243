//! Database connectivity check.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Round-trips a trivial query. Fails with `DatabaseError` when the
    /// store cannot be reached.
    async fn ping(&self) -> Result<(), DomainError>;
}
