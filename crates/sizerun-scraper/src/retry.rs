//! Fixed-delay retry on timeouts for catalog requests.
//!
//! [`fetch_with_retry`] wraps one [`Transport`] call. Only
//! [`TransportError::Timeout`] is retried. A non-200 answer is logged and
//! reported as missing data straight away, and every other transport failure
//! is handed back to the caller untouched.

use std::time::Duration;

use crate::error::TransportError;
use crate::transport::{ApiRequest, Transport};

/// Longest slice of a rejected response body that is written to the log.
const LOGGED_BODY_CHARS: usize = 512;

/// How many times to try a request and how long to wait between timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Values below 1 behave as 1.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(2_000),
        }
    }
}

/// Why a fetch produced no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingData {
    /// The service answered with a non-200 status.
    Rejected { status: u16 },
    /// Every attempt timed out.
    Exhausted { attempts: u32 },
    /// The service answered 200 with an empty document (`null`, `{}` or `[]`).
    Empty,
}

impl std::fmt::Display for MissingData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingData::Rejected { status } => write!(f, "rejected with HTTP {status}"),
            MissingData::Exhausted { attempts } => {
                write!(f, "timed out on all {attempts} attempts")
            }
            MissingData::Empty => write!(f, "empty response"),
        }
    }
}

/// Result of [`fetch_with_retry`] when no fatal transport error occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Data(serde_json::Value),
    Missing(MissingData),
}

impl FetchOutcome {
    /// Collapses the outcome to "data or nothing".
    #[must_use]
    pub fn data(self) -> Option<serde_json::Value> {
        match self {
            FetchOutcome::Data(value) => Some(value),
            FetchOutcome::Missing(_) => None,
        }
    }
}

/// Sends `request` through `transport`, retrying on timeouts only.
///
/// | failure                        | behaviour                                  |
/// |--------------------------------|--------------------------------------------|
/// | [`TransportError::Timeout`]    | log, wait `policy.delay`, try again        |
/// | [`TransportError::Status`]     | log status and body, return `Rejected`     |
/// | anything else                  | return `Err` immediately                   |
///
/// After `policy.max_attempts` timeouts the outcome is `Exhausted`. There is
/// no wait after the final attempt.
///
/// # Errors
///
/// Returns [`TransportError::Http`] or [`TransportError::Decode`] unchanged;
/// these end the owning job.
pub async fn fetch_with_retry<T>(
    transport: &T,
    request: &ApiRequest,
    policy: &RetryPolicy,
) -> Result<FetchOutcome, TransportError>
where
    T: Transport + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 1..=max_attempts {
        match transport.get_json(request).await {
            Ok(value) => return Ok(FetchOutcome::Data(value)),
            Err(TransportError::Status { status, url, body }) => {
                tracing::warn!(
                    status,
                    url = %url,
                    body = %truncate_body(&body),
                    "catalog request rejected"
                );
                return Ok(FetchOutcome::Missing(MissingData::Rejected { status }));
            }
            Err(TransportError::Timeout { url }) => {
                tracing::warn!(attempt, max_attempts, url = %url, "catalog request timed out");
                if attempt < max_attempts && !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
            }
            Err(err) => return Err(err),
        }
    }

    tracing::warn!(
        url = %request.url,
        max_attempts,
        "max attempts reached, giving up"
    );
    Ok(FetchOutcome::Missing(MissingData::Exhausted {
        attempts: max_attempts,
    }))
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= LOGGED_BODY_CHARS {
        body.to_owned()
    } else {
        let head: String = body.chars().take(LOGGED_BODY_CHARS).collect();
        format!("{head}…")
    }
}
