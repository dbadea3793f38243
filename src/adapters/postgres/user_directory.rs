//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{normalize_email, FieldUpdate, SubscriptionUpdate, User};
use crate::domain::foundation::{DomainError, ErrorCode, PlanId, Timestamp, UserId};
use crate::ports::{FindOrCreateResult, UserDirectory};

const USER_COLUMNS: &str = "id, email, display_name, lemon_squeezy_customer_id, \
     lemon_squeezy_subscription_id, plan_id, created_at";

pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to find user: {}", e)))?;

        Ok(row.map(User::from))
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    display_name: Option<String>,
    lemon_squeezy_customer_id: Option<String>,
    lemon_squeezy_subscription_id: Option<String>,
    plan_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId::from_uuid(row.id),
            email: row.email,
            display_name: row.display_name,
            lemon_squeezy_customer_id: row.lemon_squeezy_customer_id,
            lemon_squeezy_subscription_id: row.lemon_squeezy_subscription_id,
            plan_id: row.plan_id.map(PlanId::from_uuid),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

/// `(touch, value)` bind pair for one `FieldUpdate`.
///
/// The UPDATE statement only writes a column when `touch` is true, so
/// `Keep` leaves the stored value alone and `Clear` writes NULL.
fn bind_pair<T: Clone>(update: &FieldUpdate<T>) -> (bool, Option<T>) {
    match update {
        FieldUpdate::Keep => (false, None),
        FieldUpdate::Set(value) => (true, Some(value.clone())),
        FieldUpdate::Clear => (true, None),
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_or_create_user(
        &self,
        email: &str,
        display_name: Option<String>,
    ) -> Result<FindOrCreateResult, DomainError> {
        let candidate = User::new(email, display_name)?;

        // The no-op update makes RETURNING yield the existing row on conflict.
        let sql = format!(
            r#"
            INSERT INTO users (id, email, display_name, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING {}, (xmax = 0) AS inserted
            "#,
            USER_COLUMNS
        );

        let (row, inserted): (UserRow, bool) = sqlx::query_as::<_, UserWithFlag>(&sql)
            .bind(candidate.id.as_uuid())
            .bind(&candidate.email)
            .bind(&candidate.display_name)
            .bind(candidate.created_at.as_datetime())
            .fetch_one(&self.pool)
            .await
            .map(|r| (r.user, r.inserted))
            .map_err(|e| DomainError::database(format!("Failed to find or create user: {}", e)))?;

        Ok(FindOrCreateResult {
            user: User::from(row),
            created: inserted,
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email)?;
        self.find_one("email", &email).await
    }

    async fn find_user_by_subscription_id(
        &self,
        subscription_id: &str,
    ) -> Result<Option<User>, DomainError> {
        self.find_one("lemon_squeezy_subscription_id", subscription_id)
            .await
    }

    async fn update_user_subscription(
        &self,
        user_id: &UserId,
        update: SubscriptionUpdate,
    ) -> Result<(), DomainError> {
        let (set_customer, customer_id) = bind_pair(&update.customer_id);
        let (set_subscription, subscription_id) = bind_pair(&update.subscription_id);
        let (set_plan, plan_id) = bind_pair(&update.plan_id);

        let result = sqlx::query(
            r#"
            UPDATE users SET
                lemon_squeezy_customer_id =
                    CASE WHEN $2 THEN $3 ELSE lemon_squeezy_customer_id END,
                lemon_squeezy_subscription_id =
                    CASE WHEN $4 THEN $5 ELSE lemon_squeezy_subscription_id END,
                plan_id = CASE WHEN $6 THEN $7 ELSE plan_id END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(set_customer)
        .bind(customer_id)
        .bind(set_subscription)
        .bind(subscription_id)
        .bind(set_plan)
        .bind(plan_id.map(|id| *id.as_uuid()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update user subscription: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found")
                .with_detail("user_id", user_id.to_string()));
        }
        Ok(())
    }

    async fn downgrade_user_to_default_plan(&self, user_id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET plan_id = NULL, updated_at = NOW() WHERE id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to downgrade user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found")
                .with_detail("user_id", user_id.to_string()));
        }
        Ok(())
    }
}

/// `RETURNING` row of the upsert.
#[derive(Debug, sqlx::FromRow)]
struct UserWithFlag {
    #[sqlx(flatten)]
    user: UserRow,
    inserted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_pair_distinguishes_keep_from_clear() {
        assert_eq!(bind_pair::<String>(&FieldUpdate::Keep), (false, None));
        assert_eq!(bind_pair::<String>(&FieldUpdate::Clear), (true, None));
        assert_eq!(
            bind_pair(&FieldUpdate::Set("sub_1".to_string())),
            (true, Some("sub_1".to_string()))
        );
    }

    #[test]
    fn row_maps_to_user() {
        let plan = Uuid::new_v4();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            display_name: None,
            lemon_squeezy_customer_id: Some("1".to_string()),
            lemon_squeezy_subscription_id: None,
            plan_id: Some(plan),
            created_at: Utc::now(),
        };

        let user = User::from(row);

        assert_eq!(user.plan_id, Some(PlanId::from_uuid(plan)));
        assert_eq!(user.lemon_squeezy_customer_id.as_deref(), Some("1"));
    }
}
