//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod billing;
pub mod credits;

pub use billing::{BillingEventReconciler, ReconcileOutcome, SkipReason};
pub use credits::{
    CreditBalanceView, GetCreditBalanceHandler, GetCreditBalanceQuery, PlanCreditAllocator,
    QuoteCreditPriceError, QuoteCreditPriceHandler, QuoteCreditPriceQuery,
};
