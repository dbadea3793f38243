//! Assembles the application router.

use axum::{middleware, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::billing::{billing_router, BillingAppState};
use super::credits::{credits_router, CreditsAppState};
use super::middleware::{route_gate, GateState};
use super::site::{site_router, SiteAppState};

/// Everything the HTTP layer needs, built once in `main`.
#[derive(Clone)]
pub struct AppState {
    pub billing: BillingAppState,
    pub credits: CreditsAppState,
    pub site: SiteAppState,
    pub gate: GateState,
}

/// Routes without the gate or outer layers.
pub fn api_router(state: &AppState, server: &ServerConfig) -> Router {
    let webhooks = billing_router()
        .with_state(state.billing.clone())
        .layer(TimeoutLayer::new(server.webhook_timeout()));

    Router::new()
        .merge(site_router().with_state(state.site.clone()))
        .nest("/api/webhooks", webhooks)
        .nest(
            "/api/app/credits",
            credits_router().with_state(state.credits.clone()),
        )
}

/// Runs the route gate in front of `inner`.
///
/// `inner` is mounted as a fallback service so it routes on the URI the gate
/// leaves behind, which makes rewrites effective.
pub fn gated(inner: Router, gate: GateState) -> Router {
    Router::new()
        .fallback_service(inner)
        .layer(middleware::from_fn_with_state(gate, route_gate))
}

/// The full application: gated routes plus timeout and tracing layers.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    let inner = api_router(&state, server);

    gated(inner, state.gate)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}
