//! Credit grants and balances.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::CreditAllocation;
use super::credit_type::CreditType;
use crate::domain::foundation::{CreditGrantId, Timestamp, UserId, ValidationError};

/// An allocation of credits to a user. Grants are only ever added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditGrant {
    pub id: CreditGrantId,
    pub user_id: UserId,
    pub credit_type: CreditType,
    pub amount: u64,
    /// Payment, subscription or signup id that caused the grant.
    pub origin_id: String,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl CreditGrant {
    /// Builds a grant issued at `now` from an allocation rule.
    ///
    /// Fails when the expiry date is out of range.
    pub fn issue(
        user_id: UserId,
        credit_type: CreditType,
        allocation: &CreditAllocation,
        origin_id: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let expires_at = match allocation.expiry_days {
            Some(days) => Some(now.checked_add_days(i64::from(days)).ok_or_else(|| {
                ValidationError::invalid_format("expiry_days", format!("{} days is out of range", days))
            })?),
            None => None,
        };

        Ok(Self {
            id: CreditGrantId::new(),
            user_id,
            credit_type,
            amount: allocation.amount,
            origin_id: origin_id.into(),
            expires_at,
            created_at: now,
        })
    }

    /// Whether the grant still counts at `at`.
    pub fn is_active(&self, at: &Timestamp) -> bool {
        match &self.expires_at {
            Some(expiry) => expiry.is_after(at),
            None => true,
        }
    }
}

/// Sums active grants per credit type. Every type is present, zero if unheld.
pub fn active_balance(grants: &[CreditGrant], at: &Timestamp) -> BTreeMap<CreditType, u64> {
    let mut balance: BTreeMap<CreditType, u64> =
        CreditType::ALL.into_iter().map(|t| (t, 0)).collect();
    for grant in grants.iter().filter(|g| g.is_active(at)) {
        *balance.entry(grant.credit_type).or_insert(0) += grant.amount;
    }
    balance
}
