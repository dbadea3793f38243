//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    BillingEventReconciler, CreditBalanceView, GetCreditBalanceHandler, GetCreditBalanceQuery,
    PlanCreditAllocator, QuoteCreditPriceError, QuoteCreditPriceHandler, QuoteCreditPriceQuery,
    ReconcileOutcome, SkipReason,
};
