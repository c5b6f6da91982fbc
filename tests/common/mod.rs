use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tempfile::TempDir;
use watchlist_client::gateway::{Gateway, HttpTransport};
use watchlist_client::storage::{SessionStore, SqliteSessionStore};

/// Gateway pointed at `base_url` using the given store.
#[allow(dead_code)]
pub fn gateway_for(base_url: &str, store: Arc<dyn SessionStore>) -> Gateway {
    let url = format!("{}/", base_url.trim_end_matches('/'));
    let transport = HttpTransport::new(
        url::Url::parse(&url).expect("valid url"),
        Duration::from_secs(5),
    )
    .expect("transport");
    Gateway::new(Arc::new(transport), store)
}

#[allow(dead_code)]
pub fn create_temp_store() -> (Arc<SqliteSessionStore>, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("session.db");
    let store = SqliteSessionStore::new_with_path(db_path)
        .expect("failed to create sqlite store with path");
    (Arc::new(store), tmp)
}

/// Auth endpoint payload for `token`.
#[allow(dead_code)]
pub fn auth_body(token: &str) -> Value {
    json!({
        "token": token,
        "user": {
            "id": "u1",
            "name": "Ada",
            "email": "a@x.com",
            "createdAt": "2024-01-01T00:00:00Z"
        }
    })
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
