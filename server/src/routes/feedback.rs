//! Feedback routes.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use reqwest::Method;
use time::OffsetDateTime;

use super::{authorization, error_body, parse_body, relay};
use crate::services::mock;
use crate::state::AppState;

const SUBMIT_FAILED: &str = "Failed to submit feedback";

/// `GET /api/feedback`. Only a 2xx JSON reply is relayed; anything else
/// yields the mock feedback set.
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.upstream.forward(Method::GET, "/feedback", authorization(&headers), None).await {
        Ok(reply) if reply.is_json() && reply.is_success() => match reply.json() {
            Ok(body) => return (reply.status, Json(body)).into_response(),
            Err(e) => tracing::warn!(error = %e, "feedback fetch failed, using mock data"),
        },
        Ok(reply) => {
            tracing::info!(status = reply.status.as_u16(), "feedback backend unusable, using mock data");
        }
        Err(e) => tracing::warn!(error = %e, "feedback fetch failed, using mock data"),
    }
    (StatusCode::OK, Json(mock::mock_feedback(OffsetDateTime::now_utc()))).into_response()
}

/// `POST /api/feedback`.
pub async fn submit(State(state): State<AppState>, headers: HeaderMap, raw: Bytes) -> Response {
    let body = match parse_body(&raw) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "{SUBMIT_FAILED}");
            return error_body(StatusCode::INTERNAL_SERVER_ERROR, SUBMIT_FAILED);
        }
    };
    let result = state
        .upstream
        .forward(Method::POST, "/feedback", authorization(&headers), Some(&body))
        .await;
    relay(result, SUBMIT_FAILED)
}
