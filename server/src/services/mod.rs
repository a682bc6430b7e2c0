//! Upstream access and fallback data used by the proxy routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the backend conversation so route handlers can stay
//! focused on per-route fallback policy.

pub mod mock;
pub mod upstream;
