//! Per-unit pricing rules and price quotes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::credit_type::CreditType;

/// One band of volume pricing, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSlab {
    pub from: u64,
    pub to: u64,
    pub price_per_unit: f64,
}

impl PriceSlab {
    fn contains(&self, amount: u64) -> bool {
        amount >= self.from && amount <= self.to
    }
}

/// How the per-unit price of a credit type is determined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingRule {
    /// Volume pricing. The slab containing the amount prices the whole
    /// purchase; amounts past the last slab use its rate.
    Slabs { slabs: Vec<PriceSlab> },

    /// Flat rate with per-plan overrides keyed by plan codename.
    PlanRates {
        default_rate: f64,
        #[serde(default)]
        overrides: BTreeMap<String, f64>,
    },
}

impl PricingRule {
    /// Per-unit price for `amount` units bought on `plan_codename`.
    pub fn unit_price(&self, amount: u64, plan_codename: Option<&str>) -> f64 {
        match self {
            PricingRule::Slabs { slabs } => {
                let slab = slabs
                    .iter()
                    .find(|slab| slab.contains(amount))
                    .or_else(|| {
                        slabs
                            .iter()
                            .filter(|slab| amount > slab.to)
                            .max_by_key(|slab| slab.to)
                    })
                    .or_else(|| slabs.iter().min_by_key(|slab| slab.from));
                slab.map(|s| s.price_per_unit).unwrap_or(0.0)
            }
            PricingRule::PlanRates {
                default_rate,
                overrides,
            } => plan_codename
                .and_then(|codename| overrides.get(codename))
                .copied()
                .unwrap_or(*default_rate),
        }
    }

    pub(super) fn validate(&self) -> Result<(), String> {
        match self {
            PricingRule::Slabs { slabs } => {
                if slabs.is_empty() {
                    return Err("slab pricing needs at least one slab".to_string());
                }
                for slab in slabs {
                    if slab.from > slab.to {
                        return Err(format!("slab {}..{} is inverted", slab.from, slab.to));
                    }
                    if slab.price_per_unit < 0.0 {
                        return Err("slab price must not be negative".to_string());
                    }
                }
                Ok(())
            }
            PricingRule::PlanRates {
                default_rate,
                overrides,
            } => {
                if *default_rate < 0.0 || overrides.values().any(|rate| *rate < 0.0) {
                    return Err("plan rates must not be negative".to_string());
                }
                Ok(())
            }
        }
    }
}

/// A computed price for a credit purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub credit_type: CreditType,
    pub amount: u64,
    pub unit_price: f64,
    /// Total rounded to cents.
    pub total: f64,
    pub currency: String,
}

pub(super) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_slabs() -> PricingRule {
        PricingRule::Slabs {
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
        }
    }

    #[test]
    fn slab_containing_amount_sets_rate() {
        let rule = image_slabs();
        assert_eq!(rule.unit_price(1000, None), 0.01);
        assert_eq!(rule.unit_price(1001, None), 0.009);
    }

    #[test]
    fn amounts_past_last_slab_use_last_rate() {
        assert_eq!(image_slabs().unit_price(10_000, None), 0.009);
    }

    #[test]
    fn amounts_below_first_slab_use_first_rate() {
        let rule = PricingRule::Slabs {
            slabs: vec![PriceSlab {
                from: 10,
                to: 20,
                price_per_unit: 0.5,
            }],
        };
        assert_eq!(rule.unit_price(1, None), 0.5);
    }

    #[test]
    fn plan_rates_apply_overrides_by_codename() {
        let rule = PricingRule::PlanRates {
            default_rate: 0.01,
            overrides: BTreeMap::from([("premium".to_string(), 0.008)]),
        };

        assert_eq!(rule.unit_price(100, Some("premium")), 0.008);
        assert_eq!(rule.unit_price(100, Some("professional")), 0.01);
        assert_eq!(rule.unit_price(100, None), 0.01);
    }

    #[test]
    fn inverted_slab_is_invalid() {
        let rule = PricingRule::Slabs {
            slabs: vec![PriceSlab {
                from: 5,
                to: 1,
                price_per_unit: 0.1,
            }],
        };
        assert!(rule.validate().is_err());
    }

    #[test]
    fn rounds_half_cents_up() {
        assert_eq!(round_to_cents(17.999999999999996), 18.0);
        assert_eq!(round_to_cents(0.125), 0.13);
    }
}
