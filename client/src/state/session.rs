//! User session state for the current front end.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards and role-aware views read the session; it is refreshed on mount and
//! on explicit `check_session()` (e.g. right after sign-in or sign-out). There
//! is no polling and no refresh timer.
//!
//! DESIGN
//! ======
//! Each check takes a ticket (generation number) when it starts. Its result
//! is applied only if no newer check has started and the session is still
//! mounted, so a slow check can never overwrite a fresher answer or touch a
//! view that has gone away.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::auth::client::UserSource;
use crate::error::AuthError;
use crate::net::types::User;

/// `Loading -> { Authenticated(user) | Unauthenticated(error?) }`.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Loading,
    Authenticated(User),
    Unauthenticated(Option<String>),
}

impl SessionState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated(error) => error.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    fn settled(result: Result<Option<User>, AuthError>) -> Self {
        match result {
            Ok(Some(user)) => Self::Authenticated(user),
            Ok(None) => Self::Unauthenticated(None),
            Err(e) => Self::Unauthenticated(Some(e.to_string())),
        }
    }
}

#[derive(Debug)]
struct Lifecycle {
    generation: u64,
    mounted: bool,
}

/// Ticket identifying one in-flight session check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckTicket(u64);

pub struct UserSession {
    source: Arc<dyn UserSource>,
    state: watch::Sender<SessionState>,
    lifecycle: Mutex<Lifecycle>,
}

impl UserSession {
    /// A mounted session in `Loading`; no check has run yet.
    #[must_use]
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self { source, state, lifecycle: Mutex::new(Lifecycle { generation: 0, mounted: true }) }
    }

    /// Create a session and run the initial check.
    pub async fn mount(source: Arc<dyn UserSource>) -> Self {
        let session = Self::new(source);
        session.check_session().await;
        session
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receive every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Re-evaluate the session: `Loading`, ask the source, settle.
    ///
    /// Returns the state after this check (which may reflect a newer check if
    /// one overtook it).
    pub async fn check_session(&self) -> SessionState {
        let Some(ticket) = self.begin_check() else {
            return self.snapshot();
        };
        let result = self.source.current_user().await;
        self.settle(ticket, result);
        self.snapshot()
    }

    /// Start a check: bump the generation and enter `Loading`. `None` once
    /// unmounted.
    pub fn begin_check(&self) -> Option<CheckTicket> {
        let mut lifecycle = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
        if !lifecycle.mounted {
            return None;
        }
        lifecycle.generation += 1;
        self.state.send_replace(SessionState::Loading);
        Some(CheckTicket(lifecycle.generation))
    }

    /// Apply a check result if it is still current. Returns whether it was
    /// applied.
    pub fn settle(&self, ticket: CheckTicket, result: Result<Option<User>, AuthError>) -> bool {
        let lifecycle = self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner);
        if !lifecycle.mounted || lifecycle.generation != ticket.0 {
            tracing::debug!(ticket = ticket.0, current = lifecycle.generation, "discarding stale session check");
            return false;
        }
        if let Err(e) = &result {
            tracing::warn!(error = %e, "session check failed");
        }
        self.state.send_replace(SessionState::settled(result));
        true
    }

    /// Stop applying results; in-flight checks are discarded.
    pub fn unmount(&self) {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner).mounted = false;
    }
}
