//! Shared fakes for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::auth::token_store::MemoryTokenStore;
use crate::net::api::ApiClient;
use crate::net::transport::{Transport, TransportError};
use crate::net::types::{ApiRequest, ApiResponse};
use crate::util::navigator::MemoryNavigator;

/// Build a `header.payload.signature` token with a URL-safe unpadded payload.
pub fn unsigned_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}

// =============================================================================
// MockTransport
// =============================================================================

/// Scripted transport: replies are consumed in order, requests are recorded.
/// With nothing scripted it answers `200 null`.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, String>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: Value) {
        self.replies.lock().unwrap().push_back(Ok(ApiResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.replies.lock().unwrap().push_back(Err(message.to_owned()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(TransportError::Request(message)),
            None => Ok(ApiResponse::new(200, Value::Null)),
        }
    }
}

/// Pipeline wired to fakes, with handles to each fake.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub tokens: Arc<MemoryTokenStore>,
    pub navigator: Arc<MemoryNavigator>,
    pub api: ApiClient,
}

pub fn harness(location: &str) -> Harness {
    let transport = Arc::new(MockTransport::new());
    let tokens = Arc::new(MemoryTokenStore::new());
    let navigator = Arc::new(MemoryNavigator::new(location));
    let api = ApiClient::new(transport.clone(), tokens.clone(), navigator.clone());
    Harness { transport, tokens, navigator, api }
}
