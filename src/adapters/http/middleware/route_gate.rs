//! Route gate middleware.
//!
//! Resolves the session once, asks `RouteGate` what to do with the request
//! and applies the answer. Rewrites only take effect when this middleware
//! runs before routing; see `crate::adapters::http::gated`.

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    http::{header, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;

use crate::domain::routing::{GateDecision, GateRequest, RouteGate};
use crate::ports::SessionValidator;

use super::super::dto::ErrorResponse;
use super::auth::resolve_session;

/// Middleware state: the rules plus the session validator.
#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<RouteGate>,
    pub validator: Arc<dyn SessionValidator>,
}

impl GateState {
    pub fn new(gate: RouteGate, validator: Arc<dyn SessionValidator>) -> Self {
        Self {
            gate: Arc::new(gate),
            validator,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
}

pub async fn route_gate(
    State(state): State<GateState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = resolve_session(state.validator.as_ref(), request.headers()).await;

    let callback_url = Query::<CallbackParams>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(params)| params.callback_url);
    let accept = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());

    let decision = state.gate.decide(&GateRequest {
        path: request.uri().path(),
        accept,
        callback_url: callback_url.as_deref(),
        session: session.as_ref(),
    });

    match decision {
        GateDecision::Next => {}
        GateDecision::Rewrite(path) => {
            let target = match request.uri().query() {
                Some(query) => format!("{}?{}", path, query),
                None => path,
            };
            match target.parse::<Uri>() {
                Ok(uri) => {
                    tracing::debug!(from = %request.uri(), to = %uri, "Rewriting request");
                    *request.uri_mut() = uri;
                }
                Err(e) => tracing::warn!("Cannot rewrite to {}: {}", target, e),
            }
        }
        GateDecision::Unauthorized => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Unauthorized")),
            )
                .into_response();
        }
        GateDecision::Redirect(location) => {
            return Redirect::temporary(&location).into_response();
        }
    }

    if let Some(user) = session {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}
