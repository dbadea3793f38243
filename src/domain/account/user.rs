//! User account entity and its subscription fields.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlanId, Timestamp, UserId, ValidationError};

/// A registered account.
///
/// Accounts are created lazily the first time a payment event names an
/// unseen email. `plan_id == None` is the default (no-plan) state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub lemon_squeezy_customer_id: Option<String>,
    pub lemon_squeezy_subscription_id: Option<String>,
    pub plan_id: Option<PlanId>,
    pub created_at: Timestamp,
}

impl User {
    /// Creates a new account with no plan and no billing identifiers.
    pub fn new(email: &str, display_name: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            id: UserId::new(),
            email: normalize_email(email)?,
            display_name: display_name.filter(|name| !name.trim().is_empty()),
            lemon_squeezy_customer_id: None,
            lemon_squeezy_subscription_id: None,
            plan_id: None,
            created_at: Timestamp::now(),
        })
    }

    pub fn has_plan(&self) -> bool {
        self.plan_id.is_some()
    }

    /// Applies a partial subscription update in place.
    pub fn apply(&mut self, update: &SubscriptionUpdate) {
        update
            .customer_id
            .apply_to(&mut self.lemon_squeezy_customer_id);
        update
            .subscription_id
            .apply_to(&mut self.lemon_squeezy_subscription_id);
        update.plan_id.apply_to(&mut self.plan_id);
    }

    /// Reverts the account to the default (no-plan) state.
    pub fn downgrade_to_default_plan(&mut self) {
        self.plan_id = None;
    }
}

/// Trims and lowercases an email address.
///
/// Provider payloads and sessions spell the same mailbox with varying case,
/// so lookups always go through this normalisation.
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    if !email.contains('@') {
        return Err(ValidationError::invalid_format("email", "missing @ symbol"));
    }
    Ok(email.to_lowercase())
}

/// Change to a single optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the stored value untouched.
    Keep,
    /// Replace the stored value.
    Set(T),
    /// Reset the stored value to empty.
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Keep
    }
}

impl<T: Clone> FieldUpdate<T> {
    fn apply_to(&self, field: &mut Option<T>) {
        match self {
            FieldUpdate::Keep => {}
            FieldUpdate::Set(value) => *field = Some(value.clone()),
            FieldUpdate::Clear => *field = None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some` sets the field, `None` keeps it.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Keep,
        }
    }
}

/// Partial update of a user's billing fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionUpdate {
    pub customer_id: FieldUpdate<String>,
    pub subscription_id: FieldUpdate<String>,
    pub plan_id: FieldUpdate<PlanId>,
}

impl SubscriptionUpdate {
    /// Only assigns a plan.
    pub fn plan(plan_id: PlanId) -> Self {
        Self {
            plan_id: FieldUpdate::Set(plan_id),
            ..Default::default()
        }
    }

    /// Only clears the external subscription id.
    pub fn clear_subscription() -> Self {
        Self {
            subscription_id: FieldUpdate::Clear,
            ..Default::default()
        }
    }
}
