//! User list route.

#[cfg(test)]
#[path = "userlist_test.rs"]
mod userlist_test;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use reqwest::Method;
use time::OffsetDateTime;

use super::authorization;
use crate::services::mock;
use crate::state::AppState;

/// `GET /api/userlist`. Same fallback policy as the feedback listing.
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.upstream.forward(Method::GET, "/userlist", authorization(&headers), None).await {
        Ok(reply) if reply.is_json() && reply.is_success() => match reply.json() {
            Ok(body) => return (reply.status, Json(body)).into_response(),
            Err(e) => tracing::warn!(error = %e, "userlist fetch failed, using mock data"),
        },
        Ok(reply) => {
            tracing::info!(status = reply.status.as_u16(), "userlist backend unusable, using mock data");
        }
        Err(e) => tracing::warn!(error = %e, "userlist fetch failed, using mock data"),
    }
    (StatusCode::OK, Json(mock::mock_users(OffsetDateTime::now_utc()))).into_response()
}
