//! Session extraction and auth extractors for axum.
//!
//! The session token is read from `Authorization: Bearer <jwt>` or, failing
//! that, from the `session` cookie. The route gate resolves it once per
//! request and stores the `AuthenticatedUser` in the request extensions;
//! handlers read it back with `RequireAuth`.
//!
//! ```text
//! Request → route_gate → resolve_session → extensions
//!                                   ↓
//!                           Handler → RequireAuth
//! ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Raw session token from the request headers, Bearer first.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|c| {
            c.trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|t| !t.is_empty())
}

/// Validates the request's session token, if any.
///
/// Invalid and expired tokens count as no session. An unavailable validator
/// is logged and also treated as anonymous, so protected routes fail closed.
pub async fn resolve_session(
    validator: &dyn SessionValidator,
    headers: &HeaderMap,
) -> Option<AuthenticatedUser> {
    let token = session_token(headers)?;

    match validator.validate(token).await {
        Ok(user) => Some(user),
        Err(AuthError::ServiceUnavailable(msg)) => {
            tracing::error!("Session validator unavailable: {}", msg);
            None
        }
        Err(e) => {
            tracing::debug!("Ignoring session token: {}", e);
            None
        }
    }
}

/// Extractor that requires a session.
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "error": "Unauthorized" })),
            )
                .into_response(),
        }
    }
}
