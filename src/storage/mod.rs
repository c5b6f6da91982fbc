//! Durable session storage
//!
//! The gateway persists the current [`Session`] through the [`SessionStore`]
//! trait so that it survives process restarts. The token and the user
//! profile are always written and cleared together: a store never holds one
//! without the other.
//!
//! Backends:
//!
//! - [`SqliteSessionStore`] -- two key/value rows in a local SQLite file,
//!   written in a single transaction (default)
//! - [`KeyringSessionStore`] -- one OS keyring entry holding the whole
//!   session
//! - [`MemorySessionStore`] -- process-local, nothing survives a restart

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use crate::session::Session;

pub mod keyring;
pub mod memory;
pub mod sqlite;

pub use self::keyring::KeyringSessionStore;
pub use self::memory::MemorySessionStore;
pub use self::sqlite::SqliteSessionStore;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key holding the serialized user profile.
pub const USER_KEY: &str = "user";

/// Persistence for the token/profile pair.
///
/// Implementations must treat `save` and `clear` as a single logical unit
/// over both fields. `load` returns `Ok(None)` when nothing is stored; it is
/// the gateway that decides how to surface load failures.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Reads the stored session, if any.
    fn load(&self) -> Result<Option<Session>>;

    /// Writes both the token and the profile.
    fn save(&self, session: &Session) -> Result<()>;

    /// Removes both the token and the profile. Clearing an empty store is a
    /// no-op.
    fn clear(&self) -> Result<()>;

    /// Short backend name used in log output.
    fn backend_name(&self) -> &'static str;
}

/// Opens the session store selected by the storage configuration.
///
/// # Errors
///
/// Returns [`crate::error::WatchlistError::Storage`] if the SQLite backend
/// cannot create or open its database file.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.backend {
        StorageBackend::Sqlite => match &config.path {
            Some(path) => Arc::new(SqliteSessionStore::new_with_path(path)?),
            None => Arc::new(SqliteSessionStore::new()?),
        },
        StorageBackend::Keyring => Arc::new(KeyringSessionStore::new(&config.keyring_account)),
        StorageBackend::Memory => Arc::new(MemorySessionStore::new()),
    };
    tracing::debug!(backend = store.backend_name(), "Opened session store");
    Ok(store)
}
