use thiserror::Error;

/// Failure of a single HTTP attempt against the catalog service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within its timeout. The only kind the
    /// retrying fetcher retries.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The service answered with anything other than HTTP 200.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// Connection, TLS, or protocol failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 200 with a body that is not JSON.
    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed product data for {product}: {reason}")]
    MalformedProductData { product: String, reason: String },

    #[error("invalid endpoint URL \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
