//! Personal watchlist client

use crate::api::types::{
    CreateWatchlistItemRequest, UpdateWatchlistItemRequest, WatchlistItem, WatchlistStatus,
};
use crate::error::Result;
use crate::gateway::{Gateway, PendingRequest};

const WATCHLIST_PATH: &str = "/watchlist";

/// Client for `/watchlist`. All calls require a session.
#[derive(Debug, Clone, Copy)]
pub struct WatchlistApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> WatchlistApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<WatchlistItem>> {
        self.gateway
            .dispatch(PendingRequest::get(WATCHLIST_PATH))
            .await?
            .json()
    }

    /// Lists entries with the given status (`?status=PLANNED`, ...).
    pub async fn list_by_status(&self, status: WatchlistStatus) -> Result<Vec<WatchlistItem>> {
        let request = PendingRequest::get(WATCHLIST_PATH).with_query("status", status.as_str());
        self.gateway.dispatch(request).await?.json()
    }

    pub async fn get(&self, id: &str) -> Result<WatchlistItem> {
        let request = PendingRequest::get(WATCHLIST_PATH).segment(id);
        self.gateway.dispatch(request).await?.json()
    }

    /// Adds a movie to the watchlist.
    pub async fn add(&self, item: &CreateWatchlistItemRequest) -> Result<WatchlistItem> {
        let request = PendingRequest::post(WATCHLIST_PATH).with_json(item)?;
        self.gateway.dispatch(request).await?.json()
    }

    pub async fn update(
        &self,
        id: &str,
        changes: &UpdateWatchlistItemRequest,
    ) -> Result<WatchlistItem> {
        let request = PendingRequest::put(WATCHLIST_PATH)
            .segment(id)
            .with_json(changes)?;
        self.gateway.dispatch(request).await?.json()
    }

    /// Removes an entry. The response body is ignored.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let request = PendingRequest::delete(WATCHLIST_PATH).segment(id);
        self.gateway.dispatch(request).await?;
        tracing::debug!(item_id = id, "Watchlist entry removed");
        Ok(())
    }
}
