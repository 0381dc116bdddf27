use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{ApiRequest, Transport};
use crate::error::{ScraperError, TransportError};

/// [`Transport`] backed by a shared `reqwest::Client`.
///
/// The client carries the connect timeout and `User-Agent`; the overall
/// timeout is applied per request from [`ApiRequest::timeout`].
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates an `HttpTransport` with the given `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, request: &ApiRequest) -> Result<serde_json::Value, TransportError> {
        let mut builder = self
            .client
            .get(&request.url)
            .query(&request.query)
            .timeout(request.timeout)
            .header(reqwest::header::ACCEPT, "application/json");

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify(e, &request.url))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify(e, &request.url))?;

        if status != StatusCode::OK {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: request.url.clone(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            url: request.url.clone(),
            source: e,
        })
    }
}

/// Splits timeouts out of generic `reqwest` failures so the retry layer can
/// tell them apart.
fn classify(err: reqwest::Error, url: &str) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            url: url.to_owned(),
        }
    } else {
        TransportError::Http(err)
    }
}
