//! Transport abstraction and the HTTP implementation
//!
//! The [`Transport`] trait is the innermost stage of the gateway's dispatch
//! path: it turns a [`PendingRequest`] into an [`ApiResponse`] and nothing
//! more. It does not interpret status codes; credential attachment and
//! unauthorized handling live in the stages the gateway composes around it.
//!
//! Header contract for every request:
//!
//! - `Accept: application/json`
//! - `Content-Type: application/json` -- only when a body is present
//! - `Authorization: Bearer <token>` -- only when the request carries a token

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{Result, WatchlistError};
use crate::gateway::request::{ApiResponse, PendingRequest};

/// Abstraction over the network call made for each dispatched request.
///
/// Implementations must map every failure to reach the service (connect
/// errors, timeouts, truncated bodies) to [`WatchlistError::Network`] and
/// must return every HTTP response, whatever its status, as `Ok`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends `request` and returns the raw response.
    async fn send(&self, request: &PendingRequest) -> Result<ApiResponse>;
}

/// `reqwest`-backed [`Transport`]
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use url::Url;
/// use watchlist_client::gateway::HttpTransport;
///
/// let transport = HttpTransport::new(
///     Url::parse("http://localhost:5001/").unwrap(),
///     Duration::from_secs(30),
/// )
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: url::Url,
}

impl HttpTransport {
    /// Construct a transport targeting `base_url`.
    ///
    /// No network I/O is performed at construction time. `timeout` applies
    /// to each individual request.
    ///
    /// # Errors
    ///
    /// Returns [`WatchlistError::Config`] if `base_url` cannot carry path
    /// segments or the HTTP client cannot be initialised.
    pub fn new(base_url: url::Url, timeout: Duration) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(WatchlistError::Config(format!(
                "Base URL cannot carry resource paths: {}",
                base_url
            ))
            .into());
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchlistError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Base URL all request paths are resolved against.
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Resolves the full URL for `request`, percent-encoding each segment.
    pub fn endpoint(&self, request: &PendingRequest) -> Result<url::Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                WatchlistError::Config(format!(
                    "Base URL cannot carry resource paths: {}",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty();
            segments.extend(request.segments());
        }

        if !request.query().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query().iter());
        }

        Ok(url)
    }
}

fn network_err(e: reqwest::Error) -> WatchlistError {
    if e.is_builder() {
        WatchlistError::Config(format!("request could not be built: {}", e))
    } else if e.is_timeout() {
        WatchlistError::Network(format!("request timed out: {}", e))
    } else if e.is_connect() {
        WatchlistError::Network(format!("could not connect to service: {}", e))
    } else {
        WatchlistError::Network(e.to_string())
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &PendingRequest) -> Result<ApiResponse> {
        let url = self.endpoint(request)?;

        let mut req = self
            .http_client
            .request(request.method().clone(), url)
            .header(ACCEPT, "application/json");

        if let Some(body) = request.body() {
            req = req
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body).map_err(WatchlistError::Serialization)?);
        }

        if let Some(token) = request.bearer_token() {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = req.send().await.map_err(network_err)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_err)?;

        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            status,
            bytes = body.len(),
            "HTTP response received"
        );

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(url::Url::parse(base).expect("url"), Duration::from_secs(5))
            .expect("transport")
    }

    #[test]
    fn test_endpoint_at_root() {
        let t = transport("http://localhost:5001/");
        let url = t.endpoint(&PendingRequest::get("/movies")).expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5001/movies");
    }

    #[test]
    fn test_endpoint_under_base_path() {
        let t = transport("https://example.com/api/");
        let url = t
            .endpoint(&PendingRequest::get("/watchlist").segment("42"))
            .expect("endpoint");
        assert_eq!(url.as_str(), "https://example.com/api/watchlist/42");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let t = transport("http://localhost:5001/");
        let url = t
            .endpoint(&PendingRequest::get("/movies").segment("a/b c"))
            .expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5001/movies/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let t = transport("http://localhost:5001/");
        let url = t
            .endpoint(&PendingRequest::get("/movies").with_query("search", "star wars"))
            .expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5001/movies?search=star+wars");
    }

    #[tokio::test]
    async fn test_unsendable_header_is_not_a_network_error() {
        let t = transport("http://127.0.0.1:9/");
        let request = PendingRequest::get("/movies").with_bearer_token(Some("T1\n".to_string()));
        let err = t.send(&request).await.unwrap_err();
        assert!(matches!(
            WatchlistError::from_anyhow(&err),
            Some(WatchlistError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_non_base_url() {
        let result = HttpTransport::new(
            url::Url::parse("mailto:someone@example.com").expect("url"),
            Duration::from_secs(5),
        );
        assert!(result.is_err());
    }
}
