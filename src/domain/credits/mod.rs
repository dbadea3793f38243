//! Credits domain module.
//!
//! Credit types, the pricing catalogue, allocation rules and grants.

mod config;
mod credit_type;
mod errors;
mod grant;
mod pricing;

pub use config::{AllocationSet, CreditAllocation, CreditTypeConfig, CreditsConfig};
pub use credit_type::CreditType;
pub use errors::CreditsError;
pub use grant::{active_balance, CreditGrant};
pub use pricing::{PriceQuote, PriceSlab, PricingRule};
