//! Outbound request and inbound response types
//!
//! A [`PendingRequest`] describes one fire-once call to the remote service.
//! Paths are kept as a list of raw segments; the transport percent-encodes
//! each segment when it builds the final URL, so identifiers supplied by
//! callers can never escape their segment.

use bytes::Bytes;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, WatchlistError};

/// An outbound call to the remote service
///
/// # Examples
///
/// ```
/// use watchlist_client::gateway::PendingRequest;
///
/// let request = PendingRequest::get("/watchlist").with_query("status", "PLANNED");
/// assert_eq!(request.path(), "/watchlist");
/// assert!(request.bearer_token().is_none());
///
/// let request = PendingRequest::delete("movies").segment("a/b");
/// assert_eq!(request.segments(), ["movies", "a/b"]);
/// ```
#[derive(Debug, Clone)]
pub struct PendingRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    bearer_token: Option<String>,
}

impl PendingRequest {
    /// Creates a request for `path`, split on `/`.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
            body: None,
            bearer_token: None,
        }
    }

    /// `GET path`
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT path`
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE path`
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends one raw path segment (encoded by the transport).
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Serialization`] if `body` cannot be
    /// serialized.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(WatchlistError::Serialization)?);
        Ok(self)
    }

    /// Annotates the request with a bearer token.
    ///
    /// Blank tokens are dropped so a request never carries an empty bearer
    /// credential.
    pub(crate) fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Raw (unencoded) path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path for display, e.g. `/movies/42`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Query parameters in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// JSON body, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Token attached by the gateway at dispatch time.
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

/// `true` when `Bearer <token>` is a valid HTTP header value.
pub(crate) fn is_sendable_token(token: &str) -> bool {
    reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token)).is_ok()
}

/// A response received from the remote service
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: Bytes,
}

impl ApiResponse {
    /// Creates a response from a status code and raw body.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `true` for HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// `true` for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Serialization`] if the body does not match
    /// `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body).map_err(WatchlistError::Serialization)?)
    }

    /// Best-effort human readable error message.
    ///
    /// Uses the `message` or `error` field of a JSON body when present, else
    /// the raw body, else the canonical reason phrase for the status.
    pub fn error_message(&self) -> String {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&self.body) {
            for field in ["message", "error"] {
                if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
                    return message.to_string();
                }
            }
        }

        let text = self.text();
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }

        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("unknown status")
            .to_string()
    }
}
