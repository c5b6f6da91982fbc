//! Session persistence via OS keyring
//!
//! This backend stores the session in the operating system's native
//! credential store (Keychain on macOS, Secret Service on Linux, Windows
//! Credential Manager on Windows).
//!
//! The token and the profile are serialized together as one JSON document in
//! a single keyring entry. The keyring offers no multi-entry transactions, so
//! one entry is what keeps the pair from ever being half-present.

use crate::error::{Result, WatchlistError};
use crate::session::Session;
use crate::storage::SessionStore;

/// Keyring service name shared by all accounts.
pub const KEYRING_SERVICE: &str = "watchlist-client";

/// Session store backed by the OS native keyring.
///
/// The struct only remembers which account to use; no keyring I/O happens
/// until `load`, `save` or `clear` is called.
///
/// # Examples
///
/// ```no_run
/// use watchlist_client::storage::{KeyringSessionStore, SessionStore};
///
/// let store = KeyringSessionStore::new("default");
/// match store.load().unwrap() {
///     Some(session) => println!("Signed in as {}", session.user.email),
///     None => println!("No session stored"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct KeyringSessionStore {
    account: String,
}

fn keyring_err(action: &str, e: keyring::Error) -> anyhow::Error {
    WatchlistError::Storage(format!("Keyring {} failed: {}", action, e)).into()
}

impl KeyringSessionStore {
    /// Creates a store for the named keyring account.
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    /// Account name the session is stored under.
    pub fn account(&self) -> &str {
        &self.account
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, &self.account).map_err(|e| keyring_err("open", e))
    }
}

impl SessionStore for KeyringSessionStore {
    /// Returns `Ok(None)` when no session has been saved for the account.
    fn load(&self) -> Result<Option<Session>> {
        match self.entry()?.get_password() {
            Ok(json_str) => {
                let session: Session = serde_json::from_str(&json_str).map_err(|e| {
                    WatchlistError::Storage(format!("Stored session is corrupt: {}", e))
                })?;
                Ok(Some(session))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_err("read", e)),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let json_str = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&json_str)
            .map_err(|e| keyring_err("write", e))
    }

    /// No-op when nothing is stored.
    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(keyring_err("delete", e)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "keyring"
    }
}
