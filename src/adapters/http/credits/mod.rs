//! HTTP adapter for credits endpoints.
//!
//! Both endpoints require a session:
//! - `GET /api/app/credits/balance` - unexpired credits per type
//! - `GET /api/app/credits/quote?credit_type=..&amount=..` - price a purchase

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CreditsAppState;
pub use routes::credits_router;
