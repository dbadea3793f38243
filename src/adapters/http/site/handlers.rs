//! HTTP handlers for public endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::domain::foundation::Timestamp;
use crate::ports::DatabaseHealth;

/// State shared by the public endpoints.
#[derive(Clone)]
pub struct SiteAppState {
    pub site: Arc<SiteConfig>,
    pub database: Arc<dyn DatabaseHealth>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Result of the database connectivity check.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseCheckResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: Timestamp,
}

/// Site identity as served to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponse {
    pub project_name: String,
    pub project_slug: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub support_email: String,
}

impl From<&SiteConfig> for SiteResponse {
    fn from(site: &SiteConfig) -> Self {
        Self {
            project_name: site.project_name.clone(),
            project_slug: site.project_slug.clone(),
            description: site.description.clone(),
            keywords: site.keyword_list(),
            support_email: site.support_email.clone(),
        }
    }
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/test-db
pub async fn database_check(
    State(state): State<SiteAppState>,
) -> (StatusCode, Json<DatabaseCheckResponse>) {
    match state.database.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(DatabaseCheckResponse {
                success: true,
                message: "Database connection successful",
                error: None,
                timestamp: Timestamp::now(),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database connection check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DatabaseCheckResponse {
                    success: false,
                    message: "Database connection failed",
                    error: Some(e.message),
                    timestamp: Timestamp::now(),
                }),
            )
        }
    }
}

/// GET /api/site
pub async fn site_info(State(state): State<SiteAppState>) -> Json<SiteResponse> {
    Json(SiteResponse::from(state.site.as_ref()))
}
