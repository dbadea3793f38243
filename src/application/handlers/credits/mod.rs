//! Credits handlers.

mod allocate_plan_credits;
mod get_credit_balance;
mod quote_credit_price;

pub use allocate_plan_credits::{PlanCreditAllocator, SIGNUP_ORIGIN};
pub use get_credit_balance::{CreditBalanceView, GetCreditBalanceHandler, GetCreditBalanceQuery};
pub use quote_credit_price::{
    QuoteCreditPriceError, QuoteCreditPriceHandler, QuoteCreditPriceQuery,
};
