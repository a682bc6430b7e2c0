//! Auth routes: login and registration passthrough.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use reqwest::Method;
use serde_json::{Value, json};

use super::{authorization, error_body, parse_body, relay};
use crate::state::AppState;

const REGISTER_FAILED: &str = "Failed to register user";

/// Copy of a login body safe to log.
pub(crate) fn masked_credentials(body: &Value) -> Value {
    let password = body.get("password").filter(|p| !p.is_null()).map(|_| "***");
    json!({ "email": body.get("email"), "password": password })
}

/// `POST /api/auth/login` forwards to `/user/login`.
///
/// A non-JSON upstream reply is reported with the upstream status and the
/// offending content type. Non-2xx JSON replies are relayed as-is.
pub async fn login(State(state): State<AppState>, raw: Bytes) -> Response {
    let body = match parse_body(&raw) {
        Ok(body) => body,
        Err(e) => return login_failure(&e),
    };
    tracing::info!(request = %masked_credentials(&body), "login request");

    let reply = match state.upstream.forward(Method::POST, "/user/login", None, Some(&body)).await {
        Ok(reply) => reply,
        Err(e) => return login_failure(&e),
    };
    tracing::info!(status = reply.status.as_u16(), content_type = ?reply.content_type, "login upstream reply");

    if !reply.is_json() {
        let content_type = reply.content_type.as_deref().unwrap_or("unknown");
        let preview: String = String::from_utf8_lossy(&reply.body).chars().take(200).collect();
        tracing::error!(%content_type, %preview, "login upstream reply is not JSON");
        return error_body(reply.status, format!("API error: Server returned {content_type} instead of JSON"));
    }

    let data = match reply.json() {
        Ok(data) => data,
        Err(e) => return login_failure(&e),
    };

    if !reply.is_success() {
        tracing::error!(status = reply.status.as_u16(), %data, "login rejected upstream");
        if data.is_null() {
            return error_body(reply.status, "Authentication failed");
        }
    }
    (reply.status, Json(data)).into_response()
}

fn login_failure(e: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %e, "login proxy failed");
    error_body(StatusCode::INTERNAL_SERVER_ERROR, format!("Authentication failed: {e}"))
}

/// `POST /api/auth/register` forwards to `/user/register`.
pub async fn register(State(state): State<AppState>, headers: HeaderMap, raw: Bytes) -> Response {
    let body = match parse_body(&raw) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "{REGISTER_FAILED}");
            return error_body(StatusCode::INTERNAL_SERVER_ERROR, REGISTER_FAILED);
        }
    };
    let result = state
        .upstream
        .forward(Method::POST, "/user/register", authorization(&headers), Some(&body))
        .await;
    relay(result, REGISTER_FAILED)
}
