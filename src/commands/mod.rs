/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three command modules:

- `auth`      -- login, register, logout and whoami
- `movies`    -- the movie catalog
- `watchlist` -- the personal watchlist

Each handler borrows the [`Gateway`](crate::gateway::Gateway) built by
`main`, performs one call and prints either a table or pretty JSON.
*/

use serde::Serialize;

use crate::error::{Result, WatchlistError};

pub mod auth;
pub mod movies;
pub mod watchlist;

/// Serialize a value into pretty JSON.
pub(crate) fn serialize_pretty<T: Serialize + ?Sized>(
    value: &T,
) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serialize_pretty(value).map_err(WatchlistError::Serialization)?;
    println!("{}", json);
    Ok(())
}

/// Render an optional field for table output.
pub(crate) fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
