//! Credits catalogue: pricing per credit type and allocation rules.
//!
//! A deployment either uses the built-in catalogue or loads one from YAML:
//!
//! ```yaml
//! enabled: true
//! types:
//!   image_generation:
//!     name: Image Generation Credits
//!     currency: USD
//!     minimum_amount: 1
//!     pricing:
//!       kind: slabs
//!       slabs:
//!         - { from: 0, to: 1000, price_per_unit: 0.01 }
//! on_register:
//!   image_generation: { amount: 50, expiry_days: 30 }
//! on_plan_change:
//!   premium:
//!     image_generation: { amount: 500, expiry_days: 30 }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::credit_type::CreditType;
use super::errors::CreditsError;
use super::pricing::{round_to_cents, PriceQuote, PriceSlab, PricingRule};

/// Display and pricing settings of one credit type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTypeConfig {
    pub name: String,
    pub currency: String,
    #[serde(default = "default_minimum_amount")]
    pub minimum_amount: u64,
    pub pricing: PricingRule,
}

fn default_minimum_amount() -> u64 {
    1
}

/// Longest expiry an allocation may carry.
const MAX_EXPIRY_DAYS: u32 = 36_500;

/// Credits granted for one type, optionally expiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAllocation {
    pub amount: u64,
    #[serde(default)]
    pub expiry_days: Option<u32>,
}

/// Allocation per credit type.
pub type AllocationSet = BTreeMap<CreditType, CreditAllocation>;

/// The full credits catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub types: BTreeMap<CreditType, CreditTypeConfig>,
    /// Signup bonus.
    #[serde(default)]
    pub on_register: AllocationSet,
    /// Grants on plan change, keyed by plan codename.
    #[serde(default)]
    pub on_plan_change: BTreeMap<String, AllocationSet>,
}

fn default_enabled() -> bool {
    true
}

impl CreditsConfig {
    /// Parses and validates a YAML catalogue.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CreditsError> {
        let config: CreditsConfig =
            serde_yaml::from_str(yaml).map_err(|e| CreditsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML catalogue from disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CreditsError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            CreditsError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), CreditsError> {
        for (credit_type, settings) in &self.types {
            settings
                .pricing
                .validate()
                .map_err(|reason| CreditsError::InvalidConfig(format!("{}: {}", credit_type, reason)))?;
        }

        let allocated = self
            .on_register
            .iter()
            .chain(self.on_plan_change.values().flat_map(|set| set.iter()));
        for (credit_type, allocation) in allocated {
            if !self.types.contains_key(credit_type) {
                return Err(CreditsError::InvalidConfig(format!(
                    "allocation references unconfigured credit type {}",
                    credit_type
                )));
            }
            if allocation.expiry_days.is_some_and(|days| days > MAX_EXPIRY_DAYS) {
                return Err(CreditsError::InvalidConfig(format!(
                    "{}: expiry_days exceeds {}",
                    credit_type, MAX_EXPIRY_DAYS
                )));
            }
        }
        Ok(())
    }

    /// Prices a purchase of `amount` units.
    ///
    /// # Errors
    ///
    /// - `Disabled` - credits are switched off
    /// - `NotConfigured` - no pricing for this type
    /// - `BelowMinimum` - amount under the type's minimum
    pub fn quote(
        &self,
        credit_type: CreditType,
        amount: u64,
        plan_codename: Option<&str>,
    ) -> Result<PriceQuote, CreditsError> {
        if !self.enabled {
            return Err(CreditsError::Disabled);
        }
        let settings = self
            .types
            .get(&credit_type)
            .ok_or(CreditsError::NotConfigured(credit_type))?;
        if amount < settings.minimum_amount {
            return Err(CreditsError::BelowMinimum {
                credit_type,
                minimum: settings.minimum_amount,
                requested: amount,
            });
        }

        let unit_price = settings.pricing.unit_price(amount, plan_codename);
        Ok(PriceQuote {
            credit_type,
            amount,
            unit_price,
            total: round_to_cents(unit_price * amount as f64),
            currency: settings.currency.clone(),
        })
    }

    /// Grants for a plan codename, empty when credits are off or the plan
    /// has none configured.
    pub fn plan_allocation(&self, codename: &str) -> AllocationSet {
        if !self.enabled {
            return AllocationSet::new();
        }
        self.on_plan_change.get(codename).cloned().unwrap_or_default()
    }

    pub fn signup_allocation(&self) -> AllocationSet {
        if !self.enabled {
            return AllocationSet::new();
        }
        self.on_register.clone()
    }
}

impl Default for CreditsConfig {
    /// The built-in catalogue.
    fn default() -> Self {
        let thirty_days = |amount| CreditAllocation {
            amount,
            expiry_days: Some(30),
        };

        let types = BTreeMap::from([
            (
                CreditType::ImageGeneration,
                CreditTypeConfig {
                    name: "Image Generation Credits".to_string(),
                    currency: "USD".to_string(),
                    minimum_amount: 1,
                    pricing: PricingRule::Slabs {
                        slabs: vec![
                            PriceSlab {
                                from: 0,
                                to: 1000,
                                price_per_unit: 0.01,
                            },
                            PriceSlab {
                                from: 1001,
                                to: 5000,
                                price_per_unit: 0.009,
                            },
                        ],
                    },
                },
            ),
            (
                CreditType::VideoGeneration,
                CreditTypeConfig {
                    name: "Video Generation Credits".to_string(),
                    currency: "USD".to_string(),
                    minimum_amount: 1,
                    pricing: PricingRule::PlanRates {
                        default_rate: 0.01,
                        overrides: BTreeMap::from([("premium".to_string(), 0.008)]),
                    },
                },
            ),
        ]);

        let on_plan_change = BTreeMap::from([
            (
                "professional".to_string(),
                AllocationSet::from([(CreditType::ImageGeneration, thirty_days(200))]),
            ),
            (
                "premium".to_string(),
                AllocationSet::from([
                    (CreditType::ImageGeneration, thirty_days(500)),
                    (CreditType::VideoGeneration, thirty_days(200)),
                ]),
            ),
        ]);

        Self {
            enabled: true,
            types,
            on_register: AllocationSet::from([(CreditType::ImageGeneration, thirty_days(50))]),
            on_plan_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // ══════════════════════════════════════════════════════════════
    // Quotes
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn image_quote_uses_volume_slab() {
        let config = CreditsConfig::default();

        let small = config.quote(CreditType::ImageGeneration, 500, None).unwrap();
        let large = config.quote(CreditType::ImageGeneration, 2000, None).unwrap();

        assert_eq!(small.total, 5.0);
        assert_eq!(large.unit_price, 0.009);
        assert_eq!(large.total, 18.0);
        assert_eq!(large.currency, "USD");
    }

    #[test]
    fn video_quote_is_cheaper_on_premium() {
        let config = CreditsConfig::default();

        let premium = config
            .quote(CreditType::VideoGeneration, 100, Some("premium"))
            .unwrap();
        let basic = config.quote(CreditType::VideoGeneration, 100, None).unwrap();

        assert_eq!(premium.total, 0.8);
        assert_eq!(basic.total, 1.0);
    }

    #[test]
    fn quote_below_minimum_fails() {
        let result = CreditsConfig::default().quote(CreditType::ImageGeneration, 0, None);
        assert!(matches!(result, Err(CreditsError::BelowMinimum { minimum: 1, .. })));
    }

    #[test]
    fn quote_when_disabled_fails() {
        let config = CreditsConfig {
            enabled: false,
            ..CreditsConfig::default()
        };
        assert_eq!(
            config.quote(CreditType::ImageGeneration, 10, None),
            Err(CreditsError::Disabled)
        );
    }

    #[test]
    fn quote_for_unconfigured_type_fails() {
        let mut config = CreditsConfig::default();
        config.types.remove(&CreditType::VideoGeneration);
        config.on_plan_change.clear();

        assert_eq!(
            config.quote(CreditType::VideoGeneration, 10, None),
            Err(CreditsError::NotConfigured(CreditType::VideoGeneration))
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Allocations
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn premium_allocation_covers_both_types() {
        let allocation = CreditsConfig::default().plan_allocation("premium");

        assert_eq!(allocation[&CreditType::ImageGeneration].amount, 500);
        assert_eq!(allocation[&CreditType::VideoGeneration].amount, 200);
    }

    #[test]
    fn unknown_plan_has_no_allocation() {
        assert!(CreditsConfig::default().plan_allocation("free").is_empty());
    }

    #[test]
    fn disabled_credits_allocate_nothing() {
        let config = CreditsConfig {
            enabled: false,
            ..CreditsConfig::default()
        };
        assert!(config.plan_allocation("premium").is_empty());
        assert!(config.signup_allocation().is_empty());
    }

    #[test]
    fn signup_bonus_is_fifty_image_credits() {
        let signup = CreditsConfig::default().signup_allocation();
        assert_eq!(
            signup[&CreditType::ImageGeneration],
            CreditAllocation {
                amount: 50,
                expiry_days: Some(30)
            }
        );
    }

    // ══════════════════════════════════════════════════════════════
    // YAML loading
    // ══════════════════════════════════════════════════════════════

    const YAML: &str = r#"
enabled: true
types:
  image_generation:
    name: Images
    currency: EUR
    pricing:
      kind: slabs
      slabs:
        - { from: 0, to: 100, price_per_unit: 0.05 }
  video_generation:
    name: Videos
    currency: EUR
    minimum_amount: 10
    pricing:
      kind: plan_rates
      default_rate: 0.02
      overrides:
        premium: 0.01
on_plan_change:
  premium:
    video_generation: { amount: 20 }
"#;

    #[test]
    fn loads_catalogue_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(YAML.as_bytes()).unwrap();

        let config = CreditsConfig::from_yaml_file(file.path()).unwrap();

        assert_eq!(config.types[&CreditType::ImageGeneration].minimum_amount, 1);
        assert_eq!(config.types[&CreditType::VideoGeneration].currency, "EUR");
        assert!(config.on_register.is_empty());
        assert_eq!(
            config.plan_allocation("premium")[&CreditType::VideoGeneration].expiry_days,
            None
        );
    }

    #[test]
    fn missing_file_is_invalid_config() {
        let result = CreditsConfig::from_yaml_file("/nonexistent/credits.yaml");
        assert!(matches!(result, Err(CreditsError::InvalidConfig(_))));
    }

    #[test]
    fn allocation_for_unconfigured_type_is_rejected() {
        let yaml = r#"
types:
  image_generation:
    name: Images
    currency: USD
    pricing: { kind: plan_rates, default_rate: 0.01 }
on_register:
  video_generation: { amount: 5 }
"#;
        assert!(matches!(
            CreditsConfig::from_yaml_str(yaml),
            Err(CreditsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn oversized_expiry_is_rejected() {
        let yaml = r#"
types:
  image_generation:
    name: Images
    currency: USD
    pricing: { kind: plan_rates, default_rate: 0.01 }
on_plan_change:
  premium:
    image_generation: { amount: 5, expiry_days: 4000000000 }
"#;
        let result = CreditsConfig::from_yaml_str(yaml);
        assert!(matches!(result, Err(CreditsError::InvalidConfig(msg)) if msg.contains("expiry_days")));
    }

    #[test]
    fn built_in_catalogue_is_valid() {
        assert!(CreditsConfig::default().validate().is_ok());
    }
}
