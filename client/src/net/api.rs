//! Authenticated request pipeline for the dashboard API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call to `/api/...` goes through [`ApiClient::request`]:
//! - outgoing: the stored token, if any, rides along as a bearer credential;
//! - incoming: 401/403 clears the token and sends the user to sign-in
//!   (unless already there), then the failure still reaches the caller.
//!
//! This interceptor and explicit sign-out are the only places a session is
//! ended.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use super::transport::Transport;
use super::types::{ApiRequest, ApiResponse};
use crate::auth::token_store::TokenStore;
use crate::error::AuthError;
use crate::paths;
use crate::util::navigator::Navigator;

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { transport, tokens, navigator }
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Send one request through the pipeline.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Transport`] when the request never got a reply.
    /// - [`AuthError::SessionExpired`] on 401/403 (token already cleared).
    /// - [`AuthError::Status`] on any other non-2xx reply.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse, AuthError> {
        let request = ApiRequest { method, path: path.to_owned(), bearer: self.tokens.get(), body };
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        self.intercept(response)
    }

    fn intercept(&self, response: ApiResponse) -> Result<ApiResponse, AuthError> {
        if response.is_success() {
            return Ok(response);
        }

        let status = response.status;
        let message = response.message().map(str::to_owned);
        if status == 401 || status == 403 {
            self.tokens.clear();
            let current = self.navigator.current_path();
            if paths::is_sign_in(&current) {
                tracing::debug!(status, "authorization rejected on sign-in screen");
            } else {
                tracing::info!(status, from = %current, "authorization rejected; redirecting to sign-in");
                self.navigator.replace(paths::auth::SIGN_IN);
            }
            return Err(AuthError::SessionExpired { status, message });
        }

        Err(AuthError::Status { status, message })
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str) -> Result<ApiResponse, AuthError> {
        self.request(Method::GET, path, None).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, AuthError> {
        self.request(Method::POST, path, Some(body)).await
    }

    // =========================================================================
    // ENDPOINTS
    // =========================================================================

    /// `GET /taxi`: registered taxis (`{clients: [...]}`).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn list_taxis(&self) -> Result<Value, AuthError> {
        Ok(self.get("/taxi").await?.body)
    }

    /// `GET /taxi/{number}`: look up one taxi by registration number.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn find_taxi(&self, taxi_number: &str) -> Result<Value, AuthError> {
        Ok(self.get(&taxi_endpoint(taxi_number)).await?.body)
    }

    /// `POST /taxi`: create a taxi record.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn create_taxi(&self, taxi: Value) -> Result<Value, AuthError> {
        Ok(self.post("/taxi", taxi).await?.body)
    }

    /// `POST /taxi/register`: register a taxi and driver for sampling.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn register_taxi(&self, registration: Value) -> Result<Value, AuthError> {
        Ok(self.post("/taxi/register", registration).await?.body)
    }

    /// `GET /feedback`: driver feedback rows.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn list_feedback(&self) -> Result<Value, AuthError> {
        Ok(self.get("/feedback").await?.body)
    }

    /// `POST /feedback`: submit driver feedback.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn submit_feedback(&self, feedback: Value) -> Result<Value, AuthError> {
        Ok(self.post("/feedback", feedback).await?.body)
    }

    /// `GET /userlist`: admin and promoter accounts.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn list_users(&self) -> Result<Value, AuthError> {
        Ok(self.get("/userlist").await?.body)
    }

    /// `POST /auth/register`: create an admin or promoter account.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn register_user(&self, account: Value) -> Result<Value, AuthError> {
        Ok(self.post("/auth/register", account).await?.body)
    }
}

fn taxi_endpoint(taxi_number: &str) -> String {
    format!("/taxi/{}", taxi_number.trim())
}
