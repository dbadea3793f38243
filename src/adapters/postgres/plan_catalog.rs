//! PostgreSQL implementation of PlanCatalog.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::Plan;
use crate::domain::foundation::{DomainError, PlanId};
use crate::ports::PlanCatalog;

pub struct PostgresPlanCatalog {
    pool: PgPool,
}

impl PostgresPlanCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    name: String,
    codename: String,
    monthly_variant_id: Option<String>,
    yearly_variant_id: Option<String>,
    onetime_variant_id: Option<String>,
}

impl From<PlanRow> for Plan {
    fn from(row: PlanRow) -> Self {
        Plan {
            id: PlanId::from_uuid(row.id),
            name: row.name,
            codename: row.codename,
            monthly_variant_id: row.monthly_variant_id,
            yearly_variant_id: row.yearly_variant_id,
            onetime_variant_id: row.onetime_variant_id,
        }
    }
}

#[async_trait]
impl PlanCatalog for PostgresPlanCatalog {
    async fn find_plan_by_variant_id(&self, variant_id: &str) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, name, codename, monthly_variant_id, yearly_variant_id, onetime_variant_id
            FROM plans
            WHERE monthly_variant_id = $1
               OR yearly_variant_id = $1
               OR onetime_variant_id = $1
            LIMIT 1
            "#,
        )
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find plan: {}", e)))?;

        Ok(row.map(Plan::from))
    }

    async fn find_plan_by_onetime_variant_id(
        &self,
        variant_id: &str,
    ) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, name, codename, monthly_variant_id, yearly_variant_id, onetime_variant_id
            FROM plans
            WHERE onetime_variant_id = $1
            LIMIT 1
            "#,
        )
        .bind(variant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find plan: {}", e)))?;

        Ok(row.map(Plan::from))
    }

    async fn find_plan_by_id(&self, plan_id: &PlanId) -> Result<Option<Plan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT id, name, codename, monthly_variant_id, yearly_variant_id, onetime_variant_id
            FROM plans
            WHERE id = $1
            "#,
        )
        .bind(plan_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find plan: {}", e)))?;

        Ok(row.map(Plan::from))
    }
}
