//! Error types for the watchlist client
//!
//! This module defines all error types used throughout the crate, using
//! `thiserror` for ergonomic error handling. Gateway operations raise these
//! variants wrapped in `anyhow::Error`; callers recover the typed variant
//! with [`WatchlistError::from_anyhow`] or `downcast_ref`.

use thiserror::Error;

/// Main error type for watchlist client operations
///
/// The first four variants form the gateway's error taxonomy. The gateway
/// performs exactly one local recovery action (clearing the session on
/// [`WatchlistError::AuthorizationExpired`]) and otherwise propagates these
/// unmodified.
#[derive(Error, Debug)]
pub enum WatchlistError {
    /// The remote service rejected credentials at login/register time
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// An authenticated call was rejected as unauthorized (HTTP 401)
    ///
    /// The local session has already been cleared when this is returned.
    #[error("Authorization expired: {0}")]
    AuthorizationExpired(String),

    /// The call could not reach the remote service or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Durable read/write of the session failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// The remote service answered with a non-success status
    #[error("API error: status={status}, {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl WatchlistError {
    /// Returns the typed error carried by an `anyhow::Error`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use watchlist_client::error::WatchlistError;
    ///
    /// let err: anyhow::Error = WatchlistError::Network("timed out".into()).into();
    /// assert!(matches!(
    ///     WatchlistError::from_anyhow(&err),
    ///     Some(WatchlistError::Network(_))
    /// ));
    /// ```
    pub fn from_anyhow(err: &anyhow::Error) -> Option<&WatchlistError> {
        err.downcast_ref::<WatchlistError>()
    }

    /// Returns `true` when the error signals that the session was revoked
    /// by the remote service.
    pub fn is_authorization_expired(&self) -> bool {
        matches!(self, WatchlistError::AuthorizationExpired(_))
    }
}

/// Result type alias for watchlist client operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
