//! PostgreSQL implementation of DatabaseHealth.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::ports::DatabaseHealth;

pub struct PostgresDatabaseHealth {
    pool: PgPool,
}

impl PostgresDatabaseHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealth for PostgresDatabaseHealth {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}
