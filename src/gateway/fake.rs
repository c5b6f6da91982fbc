//! In-process fake transport for gateway unit tests
//!
//! [`FakeTransport`] records every request it is handed and answers from a
//! queue of scripted outcomes. An empty queue answers `200 {}`.
//!
//! ```text
//! gateway.dispatch() -> FakeTransport::send() -> requests (test inspects)
//! test push_json()   -> outcomes               -> ApiResponse
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Result, WatchlistError};
use crate::gateway::request::{ApiResponse, PendingRequest};
use crate::gateway::transport::Transport;

#[derive(Debug)]
enum Outcome {
    Response(ApiResponse),
    NetworkError(String),
}

/// Scripted [`Transport`] for tests.
#[derive(Debug, Default)]
pub struct FakeTransport {
    requests: Mutex<Vec<PendingRequest>>,
    outcomes: Mutex<VecDeque<Outcome>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with a JSON body.
    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_response(ApiResponse::new(status, body.to_string()));
    }

    /// Queues a raw response.
    pub fn push_response(&self, response: ApiResponse) {
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .push_back(Outcome::Response(response));
    }

    /// Queues a failure to reach the service.
    pub fn push_network_error(&self, message: &str) {
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .push_back(Outcome::NetworkError(message.to_string()));
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<PendingRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: &PendingRequest) -> Result<ApiResponse> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        let outcome = self.outcomes.lock().expect("outcomes lock").pop_front();
        match outcome {
            Some(Outcome::Response(response)) => Ok(response),
            Some(Outcome::NetworkError(message)) => Err(WatchlistError::Network(message).into()),
            None => Ok(ApiResponse::new(200, "{}")),
        }
    }
}
