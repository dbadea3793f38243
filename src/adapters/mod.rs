//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - session token validation
//! - `http` - axum endpoints and middleware
//! - `memory` - in-process stores for tests and local runs
//! - `postgres` - sqlx-backed stores

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
