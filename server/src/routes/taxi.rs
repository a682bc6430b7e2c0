//! Taxi routes: listing, registration and lookup by number.

#[cfg(test)]
#[path = "taxi_test.rs"]
mod taxi_test;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use reqwest::Method;
use time::OffsetDateTime;

use super::{authorization, error_body, parse_body, relay};
use crate::services::mock;
use crate::state::AppState;

const REGISTER_FAILED: &str = "Failed to register taxi";
const SEARCH_FAILED: &str = "Failed to search taxi";

/// `GET /api/taxi`. Falls back to mock taxis when the backend is down or
/// answers with something other than JSON. JSON error replies are relayed.
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let reply = match state.upstream.forward(Method::GET, "/taxi", authorization(&headers), None).await {
        Ok(reply) if reply.is_json() => reply,
        Ok(reply) => {
            tracing::info!(content_type = ?reply.content_type, "taxi backend returned non-JSON, using mock data");
            return mock_response();
        }
        Err(e) => {
            tracing::warn!(error = %e, "taxi fetch failed, using mock data");
            return mock_response();
        }
    };
    match reply.json() {
        Ok(body) => (reply.status, Json(body)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "taxi fetch failed, using mock data");
            mock_response()
        }
    }
}

fn mock_response() -> Response {
    (StatusCode::OK, Json(mock::mock_taxis(OffsetDateTime::now_utc()))).into_response()
}

/// `POST /api/taxi`.
pub async fn create(State(state): State<AppState>, headers: HeaderMap, raw: Bytes) -> Response {
    forward_post(&state, &headers, &raw, "/taxi").await
}

/// `POST /api/taxi/register`.
pub async fn register(State(state): State<AppState>, headers: HeaderMap, raw: Bytes) -> Response {
    forward_post(&state, &headers, &raw, "/taxi/register").await
}

async fn forward_post(state: &AppState, headers: &HeaderMap, raw: &[u8], path: &str) -> Response {
    let body = match parse_body(raw) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "{REGISTER_FAILED}");
            return error_body(StatusCode::INTERNAL_SERVER_ERROR, REGISTER_FAILED);
        }
    };
    let result = state
        .upstream
        .forward(Method::POST, path, authorization(headers), Some(&body))
        .await;
    relay(result, REGISTER_FAILED)
}

/// `GET /api/taxi/{taxi_number}`.
pub async fn search(State(state): State<AppState>, Path(taxi_number): Path<String>, headers: HeaderMap) -> Response {
    let path = format!("/taxi/{taxi_number}");
    let result = state.upstream.forward(Method::GET, &path, authorization(&headers), None).await;
    relay(result, SEARCH_FAILED)
}
