//! Typed resource clients for the movie/watchlist service
//!
//! Each client borrows a [`Gateway`](crate::gateway::Gateway) and routes
//! every call through [`Gateway::dispatch`](crate::gateway::Gateway::dispatch),
//! so credential attachment and 401 handling apply uniformly. Response
//! bodies are the bare payloads (`Movie`, `WatchlistItem[]`, ...).

pub mod movies;
pub mod types;
pub mod watchlist;

pub use movies::MoviesApi;
pub use types::{
    AuthResponse, CreateMovieRequest, CreateWatchlistItemRequest, LoginRequest, Movie,
    RegisterRequest, UpdateMovieRequest, UpdateWatchlistItemRequest, WatchlistItem,
    WatchlistStatus,
};
pub use watchlist::WatchlistApi;
