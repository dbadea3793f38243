//! Plan catalog entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PlanId;

/// A purchasable plan.
///
/// Each plan may be sold at up to three LemonSqueezy price points. For
/// lookup purposes the three variant ids are an unordered set of equivalent
/// keys; variant ids are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    /// Tier identifier, e.g. `professional` or `premium`.
    pub codename: String,
    pub monthly_variant_id: Option<String>,
    pub yearly_variant_id: Option<String>,
    pub onetime_variant_id: Option<String>,
}

impl Plan {
    pub fn new(name: impl Into<String>, codename: impl Into<String>) -> Self {
        Self {
            id: PlanId::new(),
            name: name.into(),
            codename: codename.into(),
            monthly_variant_id: None,
            yearly_variant_id: None,
            onetime_variant_id: None,
        }
    }

    pub fn with_monthly_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.monthly_variant_id = Some(variant_id.into());
        self
    }

    pub fn with_yearly_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.yearly_variant_id = Some(variant_id.into());
        self
    }

    pub fn with_onetime_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.onetime_variant_id = Some(variant_id.into());
        self
    }

    /// All configured variant ids.
    pub fn variant_ids(&self) -> impl Iterator<Item = &str> {
        [
            &self.monthly_variant_id,
            &self.yearly_variant_id,
            &self.onetime_variant_id,
        ]
        .into_iter()
        .filter_map(|id| id.as_deref())
    }

    /// True if any of the plan's variant ids equals `variant_id`.
    pub fn matches_variant(&self, variant_id: &str) -> bool {
        self.variant_ids().any(|id| id == variant_id)
    }

    /// True only for the one-time purchase variant.
    pub fn matches_onetime_variant(&self, variant_id: &str) -> bool {
        self.onetime_variant_id.as_deref() == Some(variant_id)
    }
}
