//! In-memory session store
//!
//! Holds the session for the lifetime of the process only. Used for
//! `--ephemeral` CLI runs and as the default store in tests; sharing one
//! instance between two gateways simulates a process restart.

use std::sync::Mutex;

use crate::error::{Result, WatchlistError};
use crate::session::Session;
use crate::storage::SessionStore;

/// Process-local [`SessionStore`].
///
/// # Examples
///
/// ```
/// use watchlist_client::storage::{MemorySessionStore, SessionStore};
///
/// let store = MemorySessionStore::new();
/// assert!(store.load().unwrap().is_none());
/// store.clear().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>> {
        self.slot
            .lock()
            .map_err(|_| WatchlistError::Storage("memory store lock poisoned".to_string()).into())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
