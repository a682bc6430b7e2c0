//! Authentication: token storage, payload decoding and the auth client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `token_store` persists the raw credential, `codec` reads its payload, and
//! `client` orchestrates sign-in / sign-out / current-user on top of both.

pub mod client;
pub mod codec;
pub mod token_store;

pub use client::{
    AuthClient, CorruptTokenPolicy, OAuthProvider, ResetPasswordParams, SignInWithPasswordParams, SignUpParams, UserSource,
};
pub use token_store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore};
