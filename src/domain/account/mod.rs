//! Account domain module.
//!
//! Users and the plan catalog they subscribe to.

mod plan;
mod user;

pub use plan::Plan;
pub use user::{normalize_email, FieldUpdate, SubscriptionUpdate, User};
