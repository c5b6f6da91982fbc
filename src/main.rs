//! watchlist - movie catalog and watchlist client
//!
#![doc = "watchlist - movie catalog and watchlist client"]
#![doc = "Main entry point for the watchlist command-line client."]

use anyhow::Result;
use colored::Colorize;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use watchlist_client::cli::{Cli, Commands};
use watchlist_client::commands;
use watchlist_client::config::Config;
use watchlist_client::error::WatchlistError;
use watchlist_client::gateway::Gateway;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(&cli.config, &cli)?;

    // Validate configuration
    config.validate()?;

    let gateway = Gateway::from_config(&config)?;
    tracing::debug!(?gateway, "Gateway ready");

    let result = run(&gateway, cli).await;

    if let Err(e) = &result {
        if WatchlistError::from_anyhow(e).is_some_and(WatchlistError::is_authorization_expired) {
            eprintln!(
                "{}",
                "Your session has expired or was revoked. Run `watchlist login` to sign in again."
                    .yellow()
            );
        }
    }

    result
}

async fn run(gateway: &Gateway, cli: Cli) -> Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Login { email, password } => {
            tracing::info!("Signing in");
            commands::auth::login(gateway, &email, &password, json).await
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            tracing::info!("Registering new account");
            commands::auth::register(gateway, &name, &email, &password, json).await
        }
        Commands::Logout => commands::auth::logout(gateway).await,
        Commands::Whoami => commands::auth::whoami(gateway, json).await,
        Commands::Movies { command } => {
            tracing::debug!(?command, "Movies command");
            commands::movies::run(gateway, command, json).await
        }
        Commands::Watchlist { command } => {
            tracing::debug!(?command, "Watchlist command");
            commands::watchlist::run(gateway, command, json).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "watchlist_client=debug,watchlist=debug"
    } else {
        "watchlist_client=info,watchlist=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
