//! Axum router configuration for public endpoints.

use axum::{routing::get, Router};

use super::handlers::{database_check, health, site_info, SiteAppState};

/// Public routes, mounted at the root.
pub fn site_router() -> Router<SiteAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/test-db", get(database_check))
        .route("/api/site", get(site_info))
}
