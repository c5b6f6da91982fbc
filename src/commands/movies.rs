//! Movie catalog commands

use colored::Colorize;
use prettytable::{row, Table};

use crate::api::types::{CreateMovieRequest, Movie, UpdateMovieRequest};
use crate::api::MoviesApi;
use crate::cli::MovieCommand;
use crate::commands::{or_dash, print_json};
use crate::error::Result;
use crate::gateway::Gateway;

/// Run one `movies` subcommand.
pub async fn run(gateway: &Gateway, command: MovieCommand, json: bool) -> Result<()> {
    let api = MoviesApi::new(gateway);

    match command {
        MovieCommand::List { search } => {
            let movies = api.list(search.as_deref()).await?;
            if json {
                print_json(&movies)
            } else {
                output_movies_table(&movies);
                Ok(())
            }
        }
        MovieCommand::Show { id } => {
            let movie = api.get(&id).await?;
            if json {
                print_json(&movie)
            } else {
                output_movie_details(&movie);
                Ok(())
            }
        }
        MovieCommand::Add {
            title,
            year,
            overview,
            genres,
            runtime,
            poster_url,
        } => {
            let movie = api
                .create(&CreateMovieRequest {
                    title,
                    overview,
                    release_year: year,
                    genres,
                    runtime,
                    poster_url,
                })
                .await?;
            report(&movie, "Added", json)
        }
        MovieCommand::Update {
            id,
            title,
            year,
            overview,
            genres,
            runtime,
            poster_url,
        } => {
            let changes = UpdateMovieRequest {
                title,
                overview,
                release_year: year,
                genres: (!genres.is_empty()).then_some(genres),
                runtime,
                poster_url,
            };
            let movie = api.update(&id, &changes).await?;
            report(&movie, "Updated", json)
        }
        MovieCommand::Delete { id } => {
            api.delete(&id).await?;
            if !json {
                println!("{}", format!("Deleted movie {}", id).green());
            }
            Ok(())
        }
    }
}

fn report(movie: &Movie, verb: &str, json: bool) -> Result<()> {
    if json {
        return print_json(movie);
    }
    println!(
        "{} {} ({}) [{}]",
        verb.green(),
        movie.title.bold(),
        movie.release_year,
        movie.id
    );
    Ok(())
}

fn output_movies_table(movies: &[Movie]) {
    if movies.is_empty() {
        println!("{}", "No movies found.".yellow());
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "Title", "Year", "Genres", "Runtime"]);
    for movie in movies {
        table.add_row(row![
            movie.id,
            movie.title,
            movie.release_year,
            movie.genres.join(", "),
            or_dash(movie.runtime.map(|m| format!("{} min", m)))
        ]);
    }

    println!();
    table.printstd();
    println!();
}

fn output_movie_details(movie: &Movie) {
    println!("\n{} ({})\n", movie.title.bold(), movie.release_year);
    println!("ID:        {}", movie.id);
    println!("Genres:    {}", movie.genres.join(", "));
    println!(
        "Runtime:   {}",
        or_dash(movie.runtime.map(|m| format!("{} min", m)))
    );
    println!("Poster:    {}", or_dash(movie.poster_url.as_deref()));
    if let Some(overview) = &movie.overview {
        println!("\n{}", overview);
    }
    println!();
}
