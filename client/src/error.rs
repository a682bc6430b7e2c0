//! Error taxonomy shared by the auth client and the request pipeline.
//!
//! DESIGN
//! ======
//! One enum replaces ad hoc probing of response shapes at every call site:
//! the pipeline normalizes transport failures and non-2xx replies once, and
//! callers match on variants.

use crate::auth::codec::DecodeError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Sign-in answered 2xx without an `access_token`.
    #[error("No access token received")]
    NoTokenReceived,
    /// The stored or received token payload could not be decoded.
    #[error("Failed to decode token: {0}")]
    Decode(#[from] DecodeError),
    /// Sign-in was rejected or could not reach the proxy.
    #[error("{0}")]
    Upstream(String),
    /// Operation intentionally left unimplemented.
    #[error("{0} not implemented")]
    NotImplemented(&'static str),
    /// The server answered 401/403; the token has been cleared.
    #[error("session expired (status {status})")]
    SessionExpired { status: u16, message: Option<String> },
    /// Any other non-2xx reply.
    #[error("request failed with status {status}{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },
    #[error("http request failed: {0}")]
    Transport(String),
    #[error("token storage failed: {0}")]
    Storage(String),
}

impl AuthError {
    /// Server-provided message carried by a status error, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::SessionExpired { message, .. } | Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
