//! HTTP adapters - REST endpoints and middleware.

pub mod billing;
pub mod credits;
pub mod dto;
pub mod middleware;
pub mod router;
pub mod site;

pub use billing::BillingAppState;
pub use credits::CreditsAppState;
pub use middleware::GateState;
pub use router::{api_router, app_router, gated, AppState};
pub use site::SiteAppState;
