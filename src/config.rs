//! Configuration management for the watchlist client
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, WatchlistError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
///
/// Holds everything needed to build a [`crate::gateway::Gateway`]: where the
/// remote service lives and where the session is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote service settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Session storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the movie/watchlist service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:5001/".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ApiConfig {
    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Session storage backend selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Local SQLite file
    #[default]
    Sqlite,
    /// OS native keyring
    Keyring,
    /// Process memory only; nothing survives a restart
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = WatchlistError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "keyring" => Ok(StorageBackend::Keyring),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(WatchlistError::Config(format!(
                "Invalid storage backend: {}. Must be one of: sqlite, keyring, memory",
                other
            ))),
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend holds the session
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database path for the SQLite backend; platform data dir when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Account name for the keyring backend
    #[serde(default = "default_keyring_account")]
    pub keyring_account: String,
}

fn default_keyring_account() -> String {
    "default".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            keyring_account: default_keyring_account(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WatchlistError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| WatchlistError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("WATCHLIST_API_URL") {
            tracing::debug!(base_url = %base_url, "Env override: WATCHLIST_API_URL");
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("WATCHLIST_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid WATCHLIST_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(backend) = std::env::var("WATCHLIST_STORAGE_BACKEND") {
            match backend.parse::<StorageBackend>() {
                Ok(value) => self.storage.backend = value,
                Err(e) => tracing::warn!("{}, keeping {:?}", e, self.storage.backend),
            }
        }

        if let Ok(account) = std::env::var("WATCHLIST_KEYRING_ACCOUNT") {
            self.storage.keyring_account = account;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }

        if cli.ephemeral {
            tracing::debug!("Ephemeral mode: session kept in memory only");
            self.storage.backend = StorageBackend::Memory;
        }
    }

    /// Parsed base URL of the remote service.
    ///
    /// A trailing slash is ensured so relative resource paths join under the
    /// base path instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Config`] if the URL is malformed or not
    /// http(s).
    pub fn base_url(&self) -> Result<url::Url> {
        let mut raw = self.api.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let url = url::Url::parse(&raw).map_err(|e| {
            WatchlistError::Config(format!("Invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(WatchlistError::Config(format!(
                "api.base_url must use http or https, got: {}",
                url.scheme()
            ))
            .into());
        }

        Ok(url)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(WatchlistError::Config("api.base_url cannot be empty".to_string()).into());
        }

        self.base_url()?;

        if self.api.timeout_seconds == 0 {
            return Err(WatchlistError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.storage.backend == StorageBackend::Keyring
            && self.storage.keyring_account.trim().is_empty()
        {
            return Err(WatchlistError::Config(
                "storage.keyring_account cannot be empty".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
