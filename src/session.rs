//! Session and user profile types
//!
//! A [`Session`] pairs the bearer token issued by the remote service with the
//! [`UserProfile`] snapshot returned at login time. The gateway owns the only
//! live `Session`; everything else receives clones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the authenticated user, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Service-assigned user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// The authenticated identity and bearer token for the current user.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use watchlist_client::session::{Session, UserProfile};
///
/// let session = Session::new(
///     "T1",
///     UserProfile {
///         id: "u1".to_string(),
///         name: "Ada".to_string(),
///         email: "a@x.com".to_string(),
///         created_at: Utc::now(),
///     },
/// );
///
/// assert_eq!(session.bearer_value(), "Bearer T1");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    /// Profile of the user the token was issued to.
    pub user: UserProfile,
}

impl Session {
    /// Creates a session from a token and profile.
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp"),
        }
    }

    #[test]
    fn test_profile_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(profile()).expect("serialize");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_profile_parses_service_timestamp() {
        let raw = r#"{"id":"u1","name":"Ada","email":"a@x.com","createdAt":"2024-03-01T10:00:00.000Z"}"#;
        let parsed: UserProfile = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(parsed.id, "u1");
        assert_eq!(parsed.created_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("super-secret", profile());
        let debug = format!("{:?}", session);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_bearer_value() {
        let session = Session::new("T1", profile());
        assert_eq!(session.bearer_value(), "Bearer T1");
    }
}
