//! Test utilities for the watchlist client
//!
//! This module provides sample session data, temporary directory
//! management and assertion helpers shared by unit tests.

use crate::config::Config;
use crate::session::{Session, UserProfile};
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// A fixed user profile
pub fn sample_profile() -> UserProfile {
    UserProfile {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        email: "a@x.com".to_string(),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

/// A session for [`sample_profile`] holding `token`
pub fn sample_session(token: &str) -> Session {
    Session::new(token, sample_profile())
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: crate::error::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = format!("{:#}", e);
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
api:
  base_url: http://127.0.0.1:5001/api
  timeout_seconds: 5

storage:
  backend: memory
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::error::WatchlistError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_sample_session_matches_profile() {
        let session = sample_session("T1");
        assert_eq!(session.token, "T1");
        assert_eq!(session.user, sample_profile());
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: crate::error::Result<()> =
            Err(WatchlistError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_test_config_yaml() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.api.timeout_seconds, 5);
        assert!(config.validate().is_ok());
    }
}
