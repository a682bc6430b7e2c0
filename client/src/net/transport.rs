//! Wire transport for JSON API calls.
//!
//! DESIGN
//! ======
//! The pipeline in `api` only sees [`Transport`], so tests swap in a scripted
//! fake. [`ReqwestTransport`] is the production implementation: it prefixes
//! the base URL, sends the JSON body and bearer header, and hands back the
//! status plus the body parsed as JSON (`Null` when it is not JSON).

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;

use super::types::{ApiRequest, ApiResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("{0}")]
    Request(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a transport rooted at `base_url` (e.g. `http://127.0.0.1:3000/api`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s) or the HTTP client fails to
    /// build.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(TransportError::InvalidBaseUrl(base_url.to_owned()));
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client, base_url: trimmed.to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| TransportError::Request(e.to_string()))?;
        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| TransportError::Request(e.to_string()))?;
        let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);

        tracing::debug!(method = %request.method, path = %request.path, status, "api call finished");
        Ok(ApiResponse { status, body })
    }
}
