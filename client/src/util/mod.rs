//! Route-level helpers shared by front ends.
//!
//! SYSTEM CONTEXT
//! ==============
//! `navigator` abstracts "where am I / go there", `guard` decides whether a
//! page may render for the current session, and `nav` derives the visible
//! navigation entries from the user's role.

pub mod guard;
pub mod nav;
pub mod navigator;
