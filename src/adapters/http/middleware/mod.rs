//! HTTP middleware for axum.
//!
//! - `auth` - session token extraction and the `RequireAuth` extractor
//! - `route_gate` - path-based access rules applied before routing

pub mod auth;
pub mod route_gate;

pub use auth::{resolve_session, session_token, AuthRejection, RequireAuth, SESSION_COOKIE};
pub use route_gate::{route_gate, GateState};
