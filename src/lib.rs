//! watchlist-client - session-authenticated client for a movie/watchlist service
//!
//! This library provides the core functionality of the `watchlist` CLI:
//! session handling, request dispatch, typed resource clients and
//! configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `gateway`: Authenticated request gateway, transport trait and HTTP transport
//! - `storage`: Durable session stores (SQLite, OS keyring, in-memory)
//! - `api`: Wire types and the movie/watchlist resource clients
//! - `session`: Session and user profile types
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Handlers behind each CLI command
//!
//! # Example
//!
//! ```no_run
//! use watchlist_client::api::MoviesApi;
//! use watchlist_client::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let gateway = Gateway::from_config(&config)?;
//!     gateway.login("a@x.com", "secret").await?;
//!     let movies = MoviesApi::new(&gateway).list(None).await?;
//!     println!("{} movies", movies.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, WatchlistError};
pub use gateway::{ApiResponse, Gateway, PendingRequest};
pub use session::{Session, UserProfile};

#[cfg(test)]
pub mod test_utils;
