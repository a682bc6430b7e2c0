//! HTTP client for the sampling backend.
//!
//! Forwards a request to `{base_url}{path}` with `Content-Type:
//! application/json` and the caller's `Authorization` header copied
//! verbatim. The reply is buffered so route handlers can decide between
//! relaying it and substituting a fallback.

#[cfg(test)]
#[path = "upstream_test.rs"]
mod upstream_test;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::config::ProxyConfig;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    HttpClientBuild(String),
    #[error("upstream request failed: {0}")]
    Request(String),
    #[error("upstream returned invalid JSON: {0}")]
    InvalidJson(String),
}

// =============================================================================
// REPLY
// =============================================================================

/// Buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl UpstreamReply {
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the buffered body as JSON regardless of the declared content type.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidJson`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, UpstreamError> {
        serde_json::from_slice(&self.body).map_err(|e| UpstreamError::InvalidJson(e.to_string()))
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client from proxy configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ProxyConfig) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| UpstreamError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.upstream_base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request upstream and buffer the reply.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Request`] on connection failures, timeouts,
    /// or when the reply body cannot be read.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<&Value>,
    ) -> Result<UpstreamReply, UpstreamError> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?
            .to_vec();

        tracing::debug!(%method, %url, status = status.as_u16(), content_type = ?content_type, "upstream reply");
        Ok(UpstreamReply { status, content_type, body })
    }
}
