//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! proxy keeps no per-request state; it only holds the upstream client.

use crate::services::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

impl AppState {
    #[must_use]
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}
