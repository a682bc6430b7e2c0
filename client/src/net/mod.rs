//! Networking modules for the dashboard's `/api` surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` moves one JSON request over the wire, `api` wraps it in the
//! authenticated pipeline (bearer injection, 401/403 interception), and
//! `types` defines the identity and wire shapes shared with callers.

pub mod api;
pub mod transport;
pub mod types;
