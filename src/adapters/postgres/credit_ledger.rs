//! PostgreSQL implementation of CreditLedger.
//!
//! Grants live in `credit_transactions`, one row per grant.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::credits::{CreditGrant, CreditType};
use crate::domain::foundation::{CreditGrantId, DomainError, Timestamp, UserId};
use crate::ports::CreditLedger;

pub struct PostgresCreditLedger {
    pool: PgPool,
}

impl PostgresCreditLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CreditTransactionRow {
    id: Uuid,
    user_id: Uuid,
    credit_type: String,
    amount: i64,
    origin_id: String,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CreditTransactionRow> for CreditGrant {
    type Error = DomainError;

    fn try_from(row: CreditTransactionRow) -> Result<Self, Self::Error> {
        let credit_type: CreditType = row
            .credit_type
            .parse()
            .map_err(|e| DomainError::database(format!("Invalid credit_type value: {}", e)))?;
        let amount = u64::try_from(row.amount)
            .map_err(|_| DomainError::database(format!("Negative credit amount: {}", row.amount)))?;

        Ok(CreditGrant {
            id: CreditGrantId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            credit_type,
            amount,
            origin_id: row.origin_id,
            expires_at: row.expires_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl CreditLedger for PostgresCreditLedger {
    async fn record_grant(&self, grant: &CreditGrant) -> Result<(), DomainError> {
        let amount = i64::try_from(grant.amount)
            .map_err(|_| DomainError::database("Credit amount out of range"))?;

        sqlx::query(
            r#"
            INSERT INTO credit_transactions (
                id, user_id, credit_type, amount, origin_id, expires_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(grant.id.as_uuid())
        .bind(grant.user_id.as_uuid())
        .bind(grant.credit_type.as_str())
        .bind(amount)
        .bind(&grant.origin_id)
        .bind(grant.expires_at.as_ref().map(|t| *t.as_datetime()))
        .bind(grant.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record credit grant: {}", e)))?;

        Ok(())
    }

    async fn grants_for_user(&self, user_id: &UserId) -> Result<Vec<CreditGrant>, DomainError> {
        let rows: Vec<CreditTransactionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, credit_type, amount, origin_id, expires_at, created_at
            FROM credit_transactions
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load credit grants: {}", e)))?;

        rows.into_iter().map(CreditGrant::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(credit_type: &str, amount: i64) -> CreditTransactionRow {
        CreditTransactionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            credit_type: credit_type.to_string(),
            amount,
            origin_id: "sub_1".to_string(),
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_grant() {
        let grant = CreditGrant::try_from(row("video_generation", 200)).unwrap();
        assert_eq!(grant.credit_type, CreditType::VideoGeneration);
        assert_eq!(grant.amount, 200);
    }

    #[test]
    fn unknown_credit_type_is_database_error() {
        let err = CreditGrant::try_from(row("audio", 1)).unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::DatabaseError);
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert!(CreditGrant::try_from(row("image_generation", -5)).is_err());
    }
}
