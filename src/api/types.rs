//! Wire types exchanged with the movie/watchlist service
//!
//! All payloads use camelCase field names on the wire. Optional request
//! fields are omitted from the JSON body when unset so that partial updates
//! only touch the fields the caller supplied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WatchlistError;
use crate::session::UserProfile;

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful response of both auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Progress of a movie on the user's watchlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchlistStatus {
    #[default]
    Planned,
    Watching,
    Completed,
    Dropped,
}

impl WatchlistStatus {
    /// Wire representation, e.g. `PLANNED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchlistStatus::Planned => "PLANNED",
            WatchlistStatus::Watching => "WATCHING",
            WatchlistStatus::Completed => "COMPLETED",
            WatchlistStatus::Dropped => "DROPPED",
        }
    }
}

impl std::fmt::Display for WatchlistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WatchlistStatus {
    type Err = WatchlistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLANNED" => Ok(WatchlistStatus::Planned),
            "WATCHING" => Ok(WatchlistStatus::Watching),
            "COMPLETED" => Ok(WatchlistStatus::Completed),
            "DROPPED" => Ok(WatchlistStatus::Dropped),
            other => Err(WatchlistError::Config(format!(
                "Invalid watchlist status: {}. Must be one of: planned, watching, completed, dropped",
                other
            ))),
        }
    }
}

/// A movie in the shared catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub release_year: i32,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Runtime in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /movies`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub release_year: i32,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// Body of `PUT /movies/{id}`; every field is optional
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// An entry on the user's watchlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: String,
    pub user_id: String,
    pub movie_id: String,
    pub status: WatchlistStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Embedded movie, when the service includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<Movie>,
}

/// Body of `POST /watchlist`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWatchlistItemRequest {
    pub movie_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WatchlistStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `PUT /watchlist/{id}`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWatchlistItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WatchlistStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
