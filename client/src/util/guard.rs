//! Route guards for authenticated and guest-only pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! A page wraps itself in a guard and calls `evaluate` every time the session
//! changes. The guard answers what to render, and on the first settled
//! session it makes its one access decision, which may be a redirect.
//!
//! DESIGN
//! ======
//! The one-decision-per-mount rule is the `Checking -> Checked` transition:
//! once `Checked`, re-renders never redirect again, which rules out redirect
//! loops driven by unrelated state changes. A fresh mount is a fresh guard.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::navigator::Navigator;
use crate::paths;
use crate::state::session::SessionState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirected,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardPhase {
    #[default]
    Checking,
    Checked(GuardDecision),
}

/// What the guarded page should show right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardView {
    Nothing,
    Error(String),
    Children,
}

pub trait RouteGuard {
    fn phase(&self) -> GuardPhase;

    /// Decide (once) and report what to render for `session`.
    fn evaluate(&mut self, session: &SessionState, navigator: &dyn Navigator) -> GuardView;
}

// =============================================================================
// AUTH GUARD
// =============================================================================

/// Pages that require a signed-in user.
#[derive(Debug, Default)]
pub struct AuthGuard {
    phase: GuardPhase,
}

impl AuthGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RouteGuard for AuthGuard {
    fn phase(&self) -> GuardPhase {
        self.phase
    }

    fn evaluate(&mut self, session: &SessionState, navigator: &dyn Navigator) -> GuardView {
        if session.is_loading() {
            return GuardView::Nothing;
        }

        if self.phase == GuardPhase::Checking {
            let decision = if session.user().is_none() && session.error().is_none() {
                tracing::debug!("user is not signed in; redirecting to sign-in");
                navigator.replace(paths::auth::SIGN_IN);
                GuardDecision::Redirected
            } else {
                GuardDecision::Allow
            };
            self.phase = GuardPhase::Checked(decision);
        }

        match session {
            SessionState::Unauthenticated(Some(error)) => GuardView::Error(error.clone()),
            SessionState::Authenticated(_) => GuardView::Children,
            _ => GuardView::Nothing,
        }
    }
}

// =============================================================================
// GUEST GUARD
// =============================================================================

/// Pages only for visitors who are not signed in (sign-in, sign-up).
#[derive(Debug, Default)]
pub struct GuestGuard {
    phase: GuardPhase,
}

impl GuestGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RouteGuard for GuestGuard {
    fn phase(&self) -> GuardPhase {
        self.phase
    }

    fn evaluate(&mut self, session: &SessionState, navigator: &dyn Navigator) -> GuardView {
        if self.phase == GuardPhase::Checking {
            if session.is_loading() {
                return GuardView::Nothing;
            }
            let decision = if session.error().is_none() && session.user().is_some() {
                tracing::debug!("user is signed in; redirecting to dashboard");
                navigator.replace(paths::dashboard::OVERVIEW);
                GuardDecision::Redirected
            } else {
                GuardDecision::Allow
            };
            self.phase = GuardPhase::Checked(decision);
        }

        match (self.phase, session.error()) {
            (GuardPhase::Checked(GuardDecision::Allow), Some(error)) => GuardView::Error(error.to_owned()),
            (GuardPhase::Checked(GuardDecision::Allow), None) => GuardView::Children,
            _ => GuardView::Nothing,
        }
    }
}
