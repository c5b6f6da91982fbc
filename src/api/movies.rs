//! Movie catalog client

use crate::api::types::{CreateMovieRequest, Movie, UpdateMovieRequest};
use crate::error::Result;
use crate::gateway::{Gateway, PendingRequest};

const MOVIES_PATH: &str = "/movies";

/// Client for `/movies`
///
/// # Examples
///
/// ```no_run
/// use watchlist_client::api::MoviesApi;
/// use watchlist_client::{Config, Gateway};
///
/// # async fn example() -> watchlist_client::Result<()> {
/// let gateway = Gateway::from_config(&Config::default())?;
/// let movies = MoviesApi::new(&gateway).list(Some("arrival")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MoviesApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> MoviesApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Lists movies, optionally filtered by a search term.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Movie>> {
        let mut request = PendingRequest::get(MOVIES_PATH);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            request = request.with_query("search", term);
        }
        self.gateway.dispatch(request).await?.json()
    }

    /// Fetches one movie.
    pub async fn get(&self, id: &str) -> Result<Movie> {
        let request = PendingRequest::get(MOVIES_PATH).segment(id);
        self.gateway.dispatch(request).await?.json()
    }

    /// Adds a movie to the catalog.
    pub async fn create(&self, movie: &CreateMovieRequest) -> Result<Movie> {
        let request = PendingRequest::post(MOVIES_PATH).with_json(movie)?;
        self.gateway.dispatch(request).await?.json()
    }

    /// Updates the supplied fields of a movie.
    pub async fn update(&self, id: &str, changes: &UpdateMovieRequest) -> Result<Movie> {
        let request = PendingRequest::put(MOVIES_PATH)
            .segment(id)
            .with_json(changes)?;
        self.gateway.dispatch(request).await?.json()
    }

    /// Deletes a movie. The response body is ignored.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = PendingRequest::delete(MOVIES_PATH).segment(id);
        self.gateway.dispatch(request).await?;
        tracing::debug!(movie_id = id, "Movie deleted");
        Ok(())
    }
}
