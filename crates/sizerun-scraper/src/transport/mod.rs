//! Single-attempt HTTP access to the catalog service.
//!
//! [`Transport`] is the seam between the pipeline and the network: the
//! pipeline only ever talks to a `dyn Transport`, so tests can swap in a
//! scripted fake while production uses [`HttpTransport`].

mod http;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

pub use http::HttpTransport;

/// One GET request against the catalog service.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl ApiRequest {
    /// Returns the value of the first query parameter named `name`.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Issues exactly one request and reports how it went. No retries here.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the parsed JSON body on HTTP 200.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Timeout`] when the request exceeds its timeout.
    /// - [`TransportError::Status`] for any status other than 200.
    /// - [`TransportError::Http`] for connection-level failures.
    /// - [`TransportError::Decode`] when a 200 body is not JSON.
    async fn get_json(&self, request: &ApiRequest) -> Result<serde_json::Value, TransportError>;
}
