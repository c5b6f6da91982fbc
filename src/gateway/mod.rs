//! Authenticated request gateway
//!
//! The [`Gateway`] mediates every call to the remote service. It owns the
//! current [`Session`], persists it through a [`SessionStore`], and wraps the
//! [`Transport`] call of each [`Gateway::dispatch`] in two stages:
//!
//! - pre-send: [`Gateway::attach_credentials`] snapshots the current token
//!   onto the request
//! - post-receive: [`Gateway::inspect_response`] turns an HTTP 401 into
//!   [`WatchlistError::AuthorizationExpired`] after clearing the session,
//!   and any other non-success status into [`WatchlistError::Api`]
//!
//! Session state per process:
//!
//! ```text
//! Unloaded --current_session--> Absent | Present
//! Absent   --login/register---> Present
//! Present  --logout | 401-----> Absent
//! ```
//!
//! `Unloaded` is only ever left once: after it, durable storage is written
//! but never re-read, so a session cleared in memory cannot be resurrected
//! from a stale store.
//!
//! # Examples
//!
//! ```no_run
//! use watchlist_client::{Config, Gateway, PendingRequest};
//!
//! # async fn example() -> watchlist_client::Result<()> {
//! let gateway = Gateway::from_config(&Config::default())?;
//! gateway.login("a@x.com", "pw").await?;
//!
//! let response = gateway.dispatch(PendingRequest::get("/movies")).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::types::{AuthResponse, LoginRequest, RegisterRequest};
use crate::gateway::request::is_sendable_token;
use crate::config::Config;
use crate::error::{Result, WatchlistError};
use crate::session::Session;
use crate::storage::{open_store, SessionStore};

pub mod request;
pub mod transport;

#[cfg(test)]
pub mod fake;

pub use request::{ApiResponse, PendingRequest};
pub use transport::{HttpTransport, Transport};

/// In-memory view of the session.
#[derive(Debug, Clone, Default)]
enum SessionState {
    /// Durable storage has not been consulted yet in this process.
    #[default]
    Unloaded,
    Absent,
    Present(Session),
}

impl SessionState {
    fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Present(session) => Some(session),
            _ => None,
        }
    }
}

/// Statuses at `/auth/*` that mean the service looked at the submitted
/// credentials and refused them.
const CREDENTIAL_REJECTIONS: [u16; 5] = [400, 401, 403, 409, 422];

/// Wraps any store failure as [`WatchlistError::Storage`], keeping typed
/// storage errors as they are.
fn storage_failure(err: anyhow::Error) -> anyhow::Error {
    match WatchlistError::from_anyhow(&err) {
        Some(WatchlistError::Storage(_)) => err,
        _ => WatchlistError::Storage(err.to_string()).into(),
    }
}

/// Mediates all outbound calls, attaching and revoking credentials.
pub struct Gateway {
    transport: Arc<dyn Transport>,
    store: Arc<dyn SessionStore>,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("transport", &self.transport)
            .field("store", &self.store.backend_name())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Creates a gateway in the `Unloaded` state.
    ///
    /// Nothing is read from `store` until the first call that needs the
    /// session.
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            transport,
            store,
            state: RwLock::new(SessionState::Unloaded),
        }
    }

    /// Builds an [`HttpTransport`] and the configured session store.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Config`] for an unusable base URL and
    /// [`WatchlistError::Storage`] if the store cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.base_url()?, config.api.timeout())?;
        let store = open_store(&config.storage)?;
        Ok(Self::new(Arc::new(transport), store))
    }

    /// Signs in with email and password.
    ///
    /// On success the returned session is installed in memory and persisted
    /// before this returns.
    ///
    /// # Errors
    ///
    /// - [`WatchlistError::Authentication`] if the service rejects the
    ///   credentials (400, 401, 403, 409 or 422), or returns a token that
    ///   cannot be sent back as a bearer header
    /// - [`WatchlistError::Api`] for any other non-success status, e.g. a
    ///   404 from a misconfigured base URL or a 429
    /// - [`WatchlistError::Network`] if the service cannot be reached
    /// - [`WatchlistError::Storage`] if the session cannot be persisted; the
    ///   previous session state is then left untouched
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = PendingRequest::post("/auth/login").with_json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.authenticate(request).await
    }

    /// Creates an account and signs in with it.
    ///
    /// Same contract as [`Gateway::login`].
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let request = PendingRequest::post("/auth/register").with_json(&RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.authenticate(request).await
    }

    /// Auth endpoints skip both dispatch stages: no bearer header is sent,
    /// and a rejection never invalidates the current session.
    async fn authenticate(&self, request: PendingRequest) -> Result<Session> {
        let path = request.path();
        let response = self.transport.send(&request).await?;

        if CREDENTIAL_REJECTIONS.contains(&response.status()) {
            let message = response.error_message();
            tracing::info!(path = %path, status = response.status(), "Credentials rejected");
            return Err(WatchlistError::Authentication(message).into());
        }
        if !response.is_success() {
            return Err(WatchlistError::Api {
                status: response.status(),
                message: response.error_message(),
            }
            .into());
        }

        let auth: AuthResponse = response.json()?;
        if auth.token.trim().is_empty() {
            return Err(WatchlistError::Authentication(
                "service returned an empty token".to_string(),
            )
            .into());
        }
        if !is_sendable_token(&auth.token) {
            return Err(WatchlistError::Authentication(
                "service returned a token that is not a valid header value".to_string(),
            )
            .into());
        }
        let session = Session::new(auth.token, auth.user);

        let mut state = self.state.write().await;
        self.store.save(&session).map_err(storage_failure)?;
        *state = SessionState::Present(session.clone());

        tracing::info!(user_id = %session.user.id, "Session established");
        Ok(session)
    }

    /// Signs out locally.
    ///
    /// The in-memory session is dropped first, then durable storage is
    /// cleared. Idempotent: succeeds when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Storage`] if durable storage cannot be
    /// cleared. The in-memory session is gone regardless.
    pub async fn logout(&self) -> Result<()> {
        let mut state = self.state.write().await;
        let had_session = state.session().is_some();
        *state = SessionState::Absent;
        self.store.clear().map_err(storage_failure)?;

        if had_session {
            tracing::info!("Session cleared by logout");
        }
        Ok(())
    }

    /// Returns the current session without touching the network.
    ///
    /// On the first call in a process this reads durable storage. Storage
    /// failures are logged and reported as "no session"; they are retried on
    /// the next call.
    pub async fn current_session(&self) -> Option<Session> {
        match self.load_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(
                    backend = self.store.backend_name(),
                    "Failed to read stored session: {:#}",
                    e
                );
                None
            }
        }
    }

    /// Fallible form of [`Gateway::current_session`]. A read failure leaves
    /// the state `Unloaded`.
    async fn load_session(&self) -> Result<Option<Session>> {
        {
            let state = self.state.read().await;
            match &*state {
                SessionState::Present(session) => return Ok(Some(session.clone())),
                SessionState::Absent => return Ok(None),
                SessionState::Unloaded => {}
            }
        }

        let mut state = self.state.write().await;
        if let SessionState::Unloaded = *state {
            match self.store.load().map_err(storage_failure)? {
                Some(session) => {
                    tracing::debug!(user_id = %session.user.id, "Restored session from storage");
                    *state = SessionState::Present(session);
                }
                None => *state = SessionState::Absent,
            }
        }
        Ok(state.session().cloned())
    }

    /// `true` when a session is present.
    pub async fn is_authenticated(&self) -> bool {
        self.current_session().await.is_some()
    }

    /// Sends `request` through the credential stages and the transport.
    ///
    /// # Errors
    ///
    /// - [`WatchlistError::AuthorizationExpired`] on HTTP 401; the session
    ///   has been cleared when this is returned
    /// - [`WatchlistError::Api`] on any other non-success status
    /// - [`WatchlistError::Network`] if the service cannot be reached
    /// - [`WatchlistError::Storage`] if the stored session cannot be read;
    ///   nothing is sent in that case
    pub async fn dispatch(&self, request: PendingRequest) -> Result<ApiResponse> {
        let request = self.attach_credentials(request).await?;
        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            authenticated = request.bearer_token().is_some(),
            "Dispatching request"
        );

        let response = self.transport.send(&request).await?;
        self.inspect_response(&request, response).await
    }

    /// Pre-send stage: annotates `request` with the token of the current
    /// session, if any.
    ///
    /// # Errors
    ///
    /// - [`WatchlistError::Storage`] if the stored session cannot be read
    /// - [`WatchlistError::AuthorizationExpired`] if the stored token cannot
    ///   be sent as a header; the session is cleared first
    pub async fn attach_credentials(&self, request: PendingRequest) -> Result<PendingRequest> {
        let token = self.load_session().await?.map(|s| s.token);

        if let Some(token) = token.as_deref() {
            if !is_sendable_token(token) {
                self.invalidate(Some(token)).await;
                return Err(WatchlistError::AuthorizationExpired(
                    "stored token is not a valid header value".to_string(),
                )
                .into());
            }
        }

        Ok(request.with_bearer_token(token))
    }

    /// Post-receive stage: maps the response status onto the error taxonomy.
    pub async fn inspect_response(
        &self,
        request: &PendingRequest,
        response: ApiResponse,
    ) -> Result<ApiResponse> {
        if response.is_unauthorized() {
            let message = response.error_message();
            self.invalidate(request.bearer_token()).await;
            return Err(WatchlistError::AuthorizationExpired(message).into());
        }

        if !response.is_success() {
            return Err(WatchlistError::Api {
                status: response.status(),
                message: response.error_message(),
            }
            .into());
        }

        Ok(response)
    }

    /// Clears the session after a 401, unless the session was replaced after
    /// the failing request picked up its token.
    async fn invalidate(&self, sent_token: Option<&str>) {
        let mut state = self.state.write().await;

        match &*state {
            SessionState::Unloaded => {
                // Storage was never read, so the request carried no stored token.
                tracing::debug!("Ignoring 401 before the session was loaded");
                return;
            }
            SessionState::Present(current) if Some(current.token.as_str()) != sent_token => {
                tracing::debug!("Ignoring 401 for a token that is no longer current");
                return;
            }
            _ => {}
        }

        let had_session = state.session().is_some();
        *state = SessionState::Absent;

        if let Err(e) = self.store.clear() {
            tracing::error!(
                backend = self.store.backend_name(),
                "Failed to clear stored session after 401: {:#}",
                e
            );
        }

        if had_session {
            tracing::warn!("Session rejected by service; signed out");
        }
    }
}
