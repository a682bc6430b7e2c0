//! Auth client: sign-in, sign-out and "who is signed in".
//!
//! DESIGN
//! ======
//! There is no session endpoint: the current user is whatever the stored
//! token's payload says. Sign-in is the only operation that talks to the
//! server; sign-out and `get_user` are purely local.
//!
//! A present-but-undecodable token is handled per [`CorruptTokenPolicy`].
//! The default fails closed (the session becomes unauthenticated with an
//! error); the placeholder policy keeps the legacy behavior of reporting a
//! fixed stand-in identity.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::codec;
use super::token_store::TokenStore;
use crate::error::AuthError;
use crate::net::api::ApiClient;
use crate::net::types::User;

const SIGN_IN_FAILED: &str = "Sign in failed";
const LOCAL_TOKEN_BYTES: usize = 12;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInWithPasswordParams {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpParams {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Discord,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordParams {
    pub email: String,
}

/// What `get_user` reports for a stored token whose payload cannot be decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorruptTokenPolicy {
    /// Surface [`AuthError::Decode`]; the session is unauthenticated.
    #[default]
    FailClosed,
    /// Report [`User::placeholder`] as if signed in.
    PlaceholderUser,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown corrupt-token policy `{0}` (expected `fail-closed` or `placeholder`)")]
pub struct ParsePolicyError(String);

impl FromStr for CorruptTokenPolicy {
    type Err = ParsePolicyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fail-closed" | "fail_closed" | "closed" => Ok(Self::FailClosed),
            "placeholder" | "placeholder-user" => Ok(Self::PlaceholderUser),
            other => Err(ParsePolicyError(other.to_owned())),
        }
    }
}

/// Source of the current user for session holders. Implemented by
/// [`AuthClient`]; tests substitute slow or scripted sources.
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn current_user(&self) -> Result<Option<User>, AuthError>;
}

#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    corrupt_token: CorruptTokenPolicy,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let tokens = Arc::clone(api.tokens());
        Self { api, tokens, corrupt_token: CorruptTokenPolicy::default() }
    }

    #[must_use]
    pub fn with_corrupt_token_policy(mut self, policy: CorruptTokenPolicy) -> Self {
        self.corrupt_token = policy;
        self
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Exchange email + password for a token via `POST /auth/login`.
    ///
    /// The token is persisted before it is decoded, so a token with an
    /// unreadable payload stays stored even though sign-in reports an error.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Upstream`] when the proxy rejects the credentials or is
    ///   unreachable (the server's `message` when it sent one).
    /// - [`AuthError::NoTokenReceived`] when the reply has no `access_token`.
    /// - [`AuthError::Decode`] when the token payload cannot be decoded.
    /// - [`AuthError::Storage`] when the token cannot be persisted.
    pub async fn sign_in_with_password(&self, params: &SignInWithPasswordParams) -> Result<(), AuthError> {
        let body = serde_json::json!({ "email": params.email, "password": params.password });
        let response = self.api.post("/auth/login", body).await.map_err(sign_in_failure)?;

        let token = response
            .body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::NoTokenReceived)?;

        self.tokens.set(token)?;
        codec::decode(token)?;

        tracing::info!(email = %params.email, "signed in");
        Ok(())
    }

    /// Drop the stored token. Never fails.
    ///
    /// # Errors
    ///
    /// Infallible; the `Result` keeps the auth operations uniform.
    #[allow(clippy::unnecessary_wraps)]
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.tokens.clear();
        tracing::info!("signed out");
        Ok(())
    }

    /// The user encoded in the stored token, or `None` when nobody is signed
    /// in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Decode`] for an undecodable token under
    /// [`CorruptTokenPolicy::FailClosed`].
    pub fn get_user(&self) -> Result<Option<User>, AuthError> {
        let Some(token) = self.tokens.get() else {
            return Ok(None);
        };

        match codec::decode(&token) {
            Ok(claims) => Ok(Some(User::from_claims(&claims))),
            Err(e) => match self.corrupt_token {
                CorruptTokenPolicy::FailClosed => {
                    tracing::warn!(error = %e, "stored token is undecodable");
                    Err(AuthError::Decode(e))
                }
                CorruptTokenPolicy::PlaceholderUser => {
                    tracing::warn!(error = %e, "stored token is undecodable; using placeholder identity");
                    Ok(Some(User::placeholder()))
                }
            },
        }
    }

    // =========================================================================
    // STUBS
    // =========================================================================

    /// Local-only sign-up: mints a random opaque token and stores it. No
    /// account is created anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the token cannot be persisted.
    pub fn sign_up(&self, params: &SignUpParams) -> Result<(), AuthError> {
        let token = generate_local_token();
        self.tokens.set(&token)?;
        tracing::info!(email = %params.email, "stored local sign-up token");
        Ok(())
    }

    /// # Errors
    ///
    /// Always [`AuthError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<(), AuthError> {
        tracing::debug!(?provider, "oauth sign-in requested");
        Err(AuthError::NotImplemented("Social authentication"))
    }

    /// # Errors
    ///
    /// Always [`AuthError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub fn reset_password(&self, _params: &ResetPasswordParams) -> Result<(), AuthError> {
        Err(AuthError::NotImplemented("Password reset"))
    }

    /// # Errors
    ///
    /// Always [`AuthError::NotImplemented`].
    #[allow(clippy::unused_self)]
    pub fn update_password(&self, _params: &ResetPasswordParams) -> Result<(), AuthError> {
        Err(AuthError::NotImplemented("Update reset"))
    }
}

#[async_trait]
impl UserSource for AuthClient {
    async fn current_user(&self) -> Result<Option<User>, AuthError> {
        self.get_user()
    }
}

/// Collapse pipeline failures into the sign-in error the form displays.
fn sign_in_failure(err: AuthError) -> AuthError {
    match err {
        AuthError::Status { message, .. } | AuthError::SessionExpired { message, .. } => {
            AuthError::Upstream(message.unwrap_or_else(|| SIGN_IN_FAILED.to_owned()))
        }
        AuthError::Transport(message) => AuthError::Upstream(message),
        other => other,
    }
}

fn generate_local_token() -> String {
    let mut bytes = [0u8; LOCAL_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
