//! Public, unauthenticated endpoints.
//!
//! - `GET /health` - liveness check
//! - `GET /api/test-db` - database connectivity check
//! - `GET /api/site` - site identity

pub mod handlers;
pub mod routes;

pub use handlers::SiteAppState;
pub use routes::site_router;
