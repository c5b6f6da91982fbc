//! Command-line interface definition for the watchlist client
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, the movie catalog and the
//! personal watchlist.

use clap::{Parser, Subcommand};

use crate::api::types::WatchlistStatus;

/// watchlist - movie catalog and watchlist client
///
/// Signs in to the watchlist service and manages movies and your personal
/// watchlist from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "watchlist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Override the service base URL from config
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "WATCHLIST_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in with it
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "WATCHLIST_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Browse and edit the movie catalog
    Movies {
        #[command(subcommand)]
        command: MovieCommand,
    },

    /// Manage your watchlist
    Watchlist {
        #[command(subcommand)]
        command: WatchlistCommand,
    },
}

/// Movie catalog subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum MovieCommand {
    /// List movies
    List {
        /// Only movies matching this search term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one movie
    Show {
        /// Movie id
        id: String,
    },

    /// Add a movie to the catalog
    Add {
        #[arg(short, long)]
        title: String,

        /// Release year
        #[arg(short, long)]
        year: i32,

        #[arg(short, long)]
        overview: Option<String>,

        /// Genre (repeatable)
        #[arg(short, long = "genre")]
        genres: Vec<String>,

        /// Runtime in minutes
        #[arg(short, long)]
        runtime: Option<u32>,

        #[arg(long)]
        poster_url: Option<String>,
    },

    /// Update fields of a movie
    Update {
        /// Movie id
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        overview: Option<String>,

        /// Replace genres (repeatable)
        #[arg(short, long = "genre")]
        genres: Vec<String>,

        #[arg(short, long)]
        runtime: Option<u32>,

        #[arg(long)]
        poster_url: Option<String>,
    },

    /// Delete a movie
    Delete {
        /// Movie id
        id: String,
    },
}

/// Watchlist subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum WatchlistCommand {
    /// List watchlist entries
    List {
        /// Filter by status (planned, watching, completed, dropped)
        #[arg(short, long)]
        status: Option<WatchlistStatus>,
    },

    /// Show one entry
    Show {
        /// Entry id
        id: String,
    },

    /// Add a movie to the watchlist
    Add {
        /// Movie id
        movie_id: String,

        #[arg(short, long)]
        status: Option<WatchlistStatus>,

        /// Rating from 1 to 10
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: Option<u8>,

        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Update an entry
    Update {
        /// Entry id
        id: String,

        #[arg(short, long)]
        status: Option<WatchlistStatus>,

        /// Rating from 1 to 10
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: Option<u8>,

        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Remove an entry
    Remove {
        /// Entry id
        id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: "config/config.yaml".to_string(),
            verbose: false,
            json: false,
            ephemeral: false,
            api_url: None,
            command: Commands::Whoami,
        }
    }
}
