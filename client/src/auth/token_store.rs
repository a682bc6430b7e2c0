//! Persisted credential token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the single source of truth for "is someone signed in". Only
//! sign-in / sign-up (write), sign-out (clear) and the 401/403 interceptor
//! (clear) mutate it; everything else reads.
//!
//! `FileTokenStore` mimics a per-origin key-value area: one JSON object on
//! disk, the token under [`TOKEN_KEY`], other keys left untouched.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};

use crate::error::AuthError;

/// Key under which the raw token string is persisted.
pub const TOKEN_KEY: &str = "custom-auth-token";

/// Synchronous token storage. Injected as `Arc<dyn TokenStore>` so guards and
/// the request pipeline can run against fakes.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the token cannot be persisted.
    fn set(&self, token: &str) -> Result<(), AuthError>;

    /// Remove the token. Failures are logged, never surfaced.
    fn clear(&self);
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.to_string()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err("store is not a JSON object".to_owned()),
            Err(e) => Err(e.to_string()),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), String> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| e.to_string())?;
        std::fs::write(&self.path, raw).map_err(|e| e.to_string())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        match self.read_entries() {
            Ok(entries) => entries
                .get(TOKEN_KEY)
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable token store; treating as signed out");
                None
            }
        }
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable token store");
            Map::new()
        });
        entries.insert(TOKEN_KEY.to_owned(), Value::String(token.to_owned()));
        self.write_entries(&entries).map_err(AuthError::Storage)
    }

    fn clear(&self) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.path.exists() {
            return;
        }
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "resetting unreadable token store");
                Map::new()
            }
        };
        entries.remove(TOKEN_KEY);
        if let Err(e) = self.write_entries(&entries) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to clear token store");
        }
    }
}
