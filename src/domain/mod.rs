//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `account` - Users and the plan catalog
//! - `billing` - Payment-provider events and signature verification
//! - `credits` - Credit types, pricing, allocation rules and grants
//! - `routing` - Route gating decisions

pub mod account;
pub mod billing;
pub mod credits;
pub mod foundation;
pub mod routing;
