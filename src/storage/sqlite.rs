//! SQLite-backed session store
//!
//! The session is kept as two rows of a `session_kv` table: the bearer token
//! under [`TOKEN_KEY`] and the JSON profile under [`USER_KEY`]. Writes and
//! deletes of the pair run inside one transaction, and reads run inside a
//! transaction as well so a reader never observes a half-written pair.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::error::{Result, WatchlistError};
use crate::session::{Session, UserProfile};
use crate::storage::{SessionStore, TOKEN_KEY, USER_KEY};

/// Environment variable overriding the default database location.
pub const SESSION_DB_ENV: &str = "WATCHLIST_SESSION_DB";

/// Session store backed by a local SQLite file
#[derive(Debug)]
pub struct SqliteSessionStore {
    db_path: PathBuf,
}

fn storage_err(action: &str) -> impl FnOnce(rusqlite::Error) -> WatchlistError + '_ {
    move |e| WatchlistError::Storage(format!("Failed to {}: {}", action, e))
}

impl SqliteSessionStore {
    /// Create a new store in the user's data directory
    ///
    /// Honors the `WATCHLIST_SESSION_DB` environment variable when set.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var(SESSION_DB_ENV) {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "watchlist", "watchlist-client")
            .ok_or_else(|| WatchlistError::Storage("Could not determine data directory".into()))?;

        Self::new_with_path(proj_dirs.data_dir().join("session.db"))
    }

    /// Create a store that uses the specified database path.
    ///
    /// Missing parent directories are created.
    ///
    /// # Examples
    ///
    /// ```
    /// use watchlist_client::storage::{SessionStore, SqliteSessionStore};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = SqliteSessionStore::new_with_path(dir.path().join("session.db")).unwrap();
    /// assert!(store.load().unwrap().is_none());
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WatchlistError::Storage(format!(
                    "Failed to create parent directory for database: {}",
                    e
                ))
            })?;
        }

        let store = Self { db_path };
        store.init()?;
        Ok(store)
    }

    /// Location of the database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path).map_err(storage_err("open session database"))?)
    }

    fn init(&self) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS session_kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(storage_err("create session table"))?;
        Ok(())
    }

    fn read_key(tx: &Transaction<'_>, key: &str) -> Result<Option<String>> {
        Ok(tx
            .query_row(
                "SELECT value FROM session_kv WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(storage_err("read session entry"))?)
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let mut conn = self.open()?;
        let tx = conn
            .transaction()
            .map_err(storage_err("start transaction"))?;

        let token = Self::read_key(&tx, TOKEN_KEY)?;
        let user = Self::read_key(&tx, USER_KEY)?;
        tx.commit().map_err(storage_err("commit transaction"))?;

        match (token, user) {
            (Some(token), Some(user_json)) => {
                let user: UserProfile = serde_json::from_str(&user_json).map_err(|e| {
                    WatchlistError::Storage(format!("Stored user profile is corrupt: {}", e))
                })?;
                Ok(Some(Session::new(token, user)))
            }
            (None, None) => Ok(None),
            (token, _) => {
                tracing::warn!(
                    has_token = token.is_some(),
                    path = %self.db_path.display(),
                    "Session storage holds only half of the session pair; ignoring it"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let user_json = serde_json::to_string(&session.user)?;

        let mut conn = self.open()?;
        let tx = conn
            .transaction()
            .map_err(storage_err("start transaction"))?;

        let entries = [
            (TOKEN_KEY, session.token.as_str()),
            (USER_KEY, user_json.as_str()),
        ];
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO session_kv (key, value) VALUES (?, ?)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(storage_err("write session entry"))?;
        }

        tx.commit().map_err(storage_err("commit session"))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut conn = self.open()?;
        let tx = conn
            .transaction()
            .map_err(storage_err("start transaction"))?;
        tx.execute(
            "DELETE FROM session_kv WHERE key IN (?, ?)",
            params![TOKEN_KEY, USER_KEY],
        )
        .map_err(storage_err("delete session"))?;
        tx.commit().map_err(storage_err("commit session removal"))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    fn create_test_store() -> (SqliteSessionStore, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let store =
            SqliteSessionStore::new_with_path(dir.path().join("session.db")).expect("create store");
        (store, dir)
    }

    fn session(token: &str) -> Session {
        Session::new(
            token,
            UserProfile {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "a@x.com".to_string(),
                created_at: DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
            },
        )
    }

    fn row_count(store: &SqliteSessionStore) -> i64 {
        let conn = Connection::open(store.db_path()).expect("open connection");
        conn.query_row("SELECT count(*) FROM session_kv", [], |r| r.get(0))
            .expect("count rows")
    }

    #[test]
    fn test_init_creates_table() {
        let (store, _dir) = create_test_store();
        let conn = Connection::open(store.db_path()).expect("open connection");
        let count: i64 = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='session_kv'",
                [],
                |r| r.get(0),
            )
            .expect("query row");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_load_empty_store_returns_none() {
        let (store, _dir) = create_test_store();
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (store, _dir) = create_test_store();
        let original = session("T1");
        store.save(&original).expect("save");
        let loaded = store.load().expect("load").expect("session present");
        assert_eq!(loaded, original);
        assert_eq!(row_count(&store), 2);
    }

    #[test]
    fn test_save_replaces_both_entries() {
        let (store, _dir) = create_test_store();
        store.save(&session("T1")).expect("first save");
        store.save(&session("T2")).expect("second save");
        assert_eq!(store.load().expect("load").expect("present").token, "T2");
        assert_eq!(row_count(&store), 2);
    }

    #[test]
    fn test_clear_removes_both_entries() {
        let (store, _dir) = create_test_store();
        store.save(&session("T1")).expect("save");
        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
        assert_eq!(row_count(&store), 0);
    }

    #[test]
    fn test_clear_empty_store_is_noop() {
        let (store, _dir) = create_test_store();
        store.clear().expect("clear empty");
        store.clear().expect("clear again");
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session.db");
        SqliteSessionStore::new_with_path(&path)
            .expect("create")
            .save(&session("T1"))
            .expect("save");

        let reopened = SqliteSessionStore::new_with_path(&path).expect("reopen");
        assert_eq!(reopened.load().expect("load").expect("present").token, "T1");
    }

    #[test]
    fn test_half_pair_is_treated_as_absent() {
        let (store, _dir) = create_test_store();
        let conn = Connection::open(store.db_path()).expect("open connection");
        conn.execute(
            "INSERT INTO session_kv (key, value) VALUES (?, ?)",
            params![TOKEN_KEY, "orphan"],
        )
        .expect("insert orphan token");

        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_corrupt_profile_is_storage_error() {
        let (store, _dir) = create_test_store();
        let conn = Connection::open(store.db_path()).expect("open connection");
        for (key, value) in [(TOKEN_KEY, "T1"), (USER_KEY, "{not json")] {
            conn.execute(
                "INSERT INTO session_kv (key, value) VALUES (?, ?)",
                params![key, value],
            )
            .expect("insert");
        }

        let err = store.load().expect_err("corrupt profile must fail");
        assert!(matches!(
            WatchlistError::from_anyhow(&err),
            Some(WatchlistError::Storage(_))
        ));
    }

    #[test]
    #[serial]
    fn test_new_respects_env_override() {
        let dir = tempdir().expect("failed to create tempdir");
        let db_path = dir.path().join("nested").join("session.db");
        env::set_var(SESSION_DB_ENV, db_path.to_string_lossy().to_string());

        let store = SqliteSessionStore::new().expect("new failed with env override");
        assert_eq!(store.db_path(), db_path.as_path());
        assert!(db_path.parent().expect("parent").exists());

        env::remove_var(SESSION_DB_ENV);
    }
}
