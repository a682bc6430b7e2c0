//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every `/api/...` route forwards to the same path on the sampling backend
//! (minus the `/api` prefix for the auth pair) and relays the reply. Routes
//! differ only in what they do when the backend misbehaves.

pub mod auth;
pub mod feedback;
pub mod taxi;
pub mod userlist;

#[cfg(test)]
pub(crate) mod test_support;

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::upstream::{UpstreamError, UpstreamReply};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/taxi", get(taxi::list).post(taxi::create))
        .route("/api/taxi/register", post(taxi::register))
        .route("/api/taxi/{taxi_number}", get(taxi::search))
        .route("/api/feedback", get(feedback::list).post(feedback::submit))
        .route("/api/userlist", get(userlist::list))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// HELPERS
// =============================================================================

/// Incoming `Authorization` header, forwarded verbatim when present.
pub(crate) fn authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}

/// Parse a raw request body as JSON.
pub(crate) fn parse_body(raw: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(raw)
}

pub(crate) fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Relay an upstream reply's status and JSON body, or a 500 with `failure`
/// when the request failed or the reply is not JSON.
pub(crate) fn relay(result: Result<UpstreamReply, UpstreamError>, failure: &str) -> Response {
    match result.and_then(|reply| reply.json().map(|body| (reply.status, body))) {
        Ok((status, body)) => (status, Json(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "{failure}");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, failure)
        }
    }
}
