//! Observable client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` tracks who is signed in for guards and role-aware views;
//! `overview` derives the dashboard's aggregate counts from list endpoints.

pub mod overview;
pub mod session;
