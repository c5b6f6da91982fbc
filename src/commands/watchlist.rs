//! Watchlist commands

use colored::Colorize;
use prettytable::{row, Table};

use crate::api::types::{
    CreateWatchlistItemRequest, UpdateWatchlistItemRequest, WatchlistItem, WatchlistStatus,
};
use crate::api::WatchlistApi;
use crate::cli::WatchlistCommand;
use crate::commands::{or_dash, print_json};
use crate::error::Result;
use crate::gateway::Gateway;

/// Run one `watchlist` subcommand.
pub async fn run(gateway: &Gateway, command: WatchlistCommand, json: bool) -> Result<()> {
    let api = WatchlistApi::new(gateway);

    match command {
        WatchlistCommand::List { status } => {
            let items = match status {
                Some(status) => api.list_by_status(status).await?,
                None => api.list().await?,
            };
            if json {
                print_json(&items)
            } else {
                output_items_table(&items);
                Ok(())
            }
        }
        WatchlistCommand::Show { id } => {
            let item = api.get(&id).await?;
            if json {
                print_json(&item)
            } else {
                output_item_details(&item);
                Ok(())
            }
        }
        WatchlistCommand::Add {
            movie_id,
            status,
            rating,
            notes,
        } => {
            let item = api
                .add(&CreateWatchlistItemRequest {
                    movie_id,
                    status,
                    rating,
                    notes,
                })
                .await?;
            report(&item, "Added to watchlist", json)
        }
        WatchlistCommand::Update {
            id,
            status,
            rating,
            notes,
        } => {
            let item = api
                .update(
                    &id,
                    &UpdateWatchlistItemRequest {
                        status,
                        rating,
                        notes,
                    },
                )
                .await?;
            report(&item, "Updated", json)
        }
        WatchlistCommand::Remove { id } => {
            api.remove(&id).await?;
            if !json {
                println!("{}", format!("Removed watchlist entry {}", id).green());
            }
            Ok(())
        }
    }
}

fn title_of(item: &WatchlistItem) -> &str {
    item.movie
        .as_ref()
        .map(|m| m.title.as_str())
        .unwrap_or(item.movie_id.as_str())
}

fn colored_status(status: WatchlistStatus) -> String {
    match status {
        WatchlistStatus::Planned => status.as_str().cyan().to_string(),
        WatchlistStatus::Watching => status.as_str().yellow().to_string(),
        WatchlistStatus::Completed => status.as_str().green().to_string(),
        WatchlistStatus::Dropped => status.as_str().red().to_string(),
    }
}

fn report(item: &WatchlistItem, headline: &str, json: bool) -> Result<()> {
    if json {
        return print_json(item);
    }
    println!(
        "{}: {} [{}] ({})",
        headline.green(),
        title_of(item).bold(),
        colored_status(item.status),
        item.id
    );
    Ok(())
}

fn output_items_table(items: &[WatchlistItem]) {
    if items.is_empty() {
        println!("{}", "Your watchlist is empty.".yellow());
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "Movie", "Status", "Rating", "Updated"]);
    for item in items {
        table.add_row(row![
            item.id,
            title_of(item),
            colored_status(item.status),
            or_dash(item.rating.map(|r| format!("{}/10", r))),
            item.updated_at.format("%Y-%m-%d")
        ]);
    }

    println!();
    table.printstd();
    println!();
}

fn output_item_details(item: &WatchlistItem) {
    println!("\n{}\n", title_of(item).bold());
    println!("ID:       {}", item.id);
    println!("Movie:    {}", item.movie_id);
    println!("Status:   {}", colored_status(item.status));
    println!("Rating:   {}", or_dash(item.rating.map(|r| format!("{}/10", r))));
    println!("Added:    {}", item.created_at.format("%Y-%m-%d"));
    println!("Updated:  {}", item.updated_at.format("%Y-%m-%d"));
    if let Some(notes) = &item.notes {
        println!("\n{}", notes);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(movie: Option<crate::api::types::Movie>) -> WatchlistItem {
        WatchlistItem {
            id: "w1".to_string(),
            user_id: "u1".to_string(),
            movie_id: "m1".to_string(),
            status: WatchlistStatus::Planned,
            rating: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            movie,
        }
    }

    #[test]
    fn test_title_falls_back_to_movie_id() {
        assert_eq!(title_of(&item(None)), "m1");
    }

    #[test]
    fn test_title_prefers_embedded_movie() {
        let movie = crate::api::types::Movie {
            id: "m1".to_string(),
            title: "Arrival".to_string(),
            overview: None,
            release_year: 2016,
            genres: vec![],
            runtime: None,
            poster_url: None,
            created_by: "u1".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(title_of(&item(Some(movie))), "Arrival");
    }
}
