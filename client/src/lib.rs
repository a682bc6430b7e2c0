//! Session core for the taxi sampling dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything a dashboard front end needs to know about "who is signed in":
//! the persisted token store, the token payload codec, the auth client, the
//! authenticated request pipeline, the session state holder, route guards and
//! the role-aware navigation list. The CLI sits on top of this crate; the proxy
//! server only relays what it calls.
//!
//! TRUST MODEL
//! ===========
//! Tokens are decoded, never verified. The upstream issuer is the only party
//! that can reject a token, and it does so per request with 401/403, which the
//! request pipeline turns into a logout + redirect.

pub mod auth;
pub mod error;
pub mod net;
pub mod paths;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::AuthError;
