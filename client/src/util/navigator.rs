//! Navigation location abstraction.

use std::sync::{Mutex, PoisonError};

/// Current location plus history-replacing navigation.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;

    /// Replace the current location (no new history entry).
    fn replace(&self, path: &str);
}

/// In-process navigator that records every replacement.
#[derive(Debug)]
pub struct MemoryNavigator {
    inner: Mutex<NavigatorInner>,
}

#[derive(Debug)]
struct NavigatorInner {
    location: String,
    replacements: Vec<String>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self { inner: Mutex::new(NavigatorInner { location: initial.to_owned(), replacements: Vec::new() }) }
    }

    /// Move to `path` as a user-initiated visit (not counted as a redirect).
    pub fn visit(&self, path: &str) {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).location = path.to_owned();
    }

    /// Every path passed to [`Navigator::replace`], oldest first.
    #[must_use]
    pub fn replacements(&self) -> Vec<String> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).replacements.clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).location.clone()
    }

    fn replace(&self, path: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(from = %inner.location, to = %path, "navigation replaced");
        inner.location = path.to_owned();
        inner.replacements.push(path.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_moves_location_and_records() {
        let nav = MemoryNavigator::new("/dashboard/taxis");
        nav.replace("/auth/sign-in");
        assert_eq!(nav.current_path(), "/auth/sign-in");
        assert_eq!(nav.replacements(), vec!["/auth/sign-in".to_owned()]);
    }

    #[test]
    fn visit_is_not_a_replacement() {
        let nav = MemoryNavigator::new("/");
        nav.visit("/dashboard/overview");
        assert_eq!(nav.current_path(), "/dashboard/overview");
        assert!(nav.replacements().is_empty());
    }
}
