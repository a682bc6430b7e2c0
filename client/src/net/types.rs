//! Identity and wire DTOs shared across the client.
//!
//! DESIGN
//! ======
//! `User` is never fetched from a server; it is projected out of the token
//! payload by [`User::from_claims`]. Unknown claims are kept in `extra` so
//! callers can still reach fields the upstream adds later.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role assumed when the token payload does not carry one.
pub const DEFAULT_ROLE: &str = "promoter";

/// Identifier used when the payload has no usable `id` claim.
pub const FALLBACK_USER_ID: &str = "USR-000";

// =============================================================================
// ROLE
// =============================================================================

/// Typed view over the free-form `role` claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Superadmin,
    Admin,
    Promoter,
    Other(String),
}

impl Role {
    /// Case-sensitive: the upstream only ever issues lowercase role names.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "superadmin" => Self::Superadmin,
            "admin" => Self::Admin,
            "promoter" => Self::Promoter,
            other => Self::Other(other.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin => "admin",
            Self::Promoter => "promoter",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// USER
// =============================================================================

/// The signed-in user, derived from the credential token payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Remaining payload claims.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Project a user out of decoded token claims.
    ///
    /// Claims live under a nested `data` object when the issuer wraps them,
    /// otherwise at the top level. `id` falls back to [`FALLBACK_USER_ID`]
    /// and `role` to [`DEFAULT_ROLE`].
    #[must_use]
    pub fn from_claims(payload: &Map<String, Value>) -> Self {
        let claims = match payload.get("data") {
            Some(Value::Object(nested)) => nested,
            _ => payload,
        };

        let id = claims.get("id").and_then(claim_text).unwrap_or_else(|| FALLBACK_USER_ID.to_owned());
        let name = claims.get("name").and_then(claim_text);
        let email = claims.get("email").and_then(claim_text);
        let role = claims.get("role").and_then(claim_text).unwrap_or_else(|| DEFAULT_ROLE.to_owned());
        let avatar = claims.get("avatar").and_then(claim_text);

        let extra = claims
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "id" | "name" | "email" | "role" | "avatar"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self { id, name, email, role: Some(role), avatar, extra }
    }

    /// Static identity substituted for an undecodable token under the
    /// placeholder policy.
    #[must_use]
    pub fn placeholder() -> Self {
        let mut extra = Map::new();
        extra.insert("firstName".to_owned(), Value::String("Sofia".to_owned()));
        extra.insert("lastName".to_owned(), Value::String("Rivers".to_owned()));
        Self {
            id: FALLBACK_USER_ID.to_owned(),
            name: None,
            email: Some("sofia@devias.io".to_owned()),
            role: None,
            avatar: Some("/assets/avatar.png".to_owned()),
            extra,
        }
    }

    /// Typed role, or `None` when the user carries no role at all.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().map(Role::parse)
    }

    /// Best label for greeting the user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().or(self.email.as_deref()).unwrap_or(&self.id)
    }
}

/// Non-empty string or number claim rendered as text.
fn claim_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// =============================================================================
// WIRE
// =============================================================================

/// One outgoing JSON request, relative to the API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// A reply as seen by the pipeline. Non-JSON bodies arrive as `Value::Null`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body's `message` field, if it is a string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}
