//! Scripted in-memory [`Transport`] for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::transport::{ApiRequest, Transport};

/// One canned reply.
#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Json(serde_json::Value),
    Status(u16),
    Timeout,
    NotJson,
    Panic,
}

/// Replies are keyed by `(url, query)` and consumed in order; an exhausted or
/// unknown key answers 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<HashMap<(String, String), VecDeque<Scripted>>>,
    latency: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub(crate) fn reply(&self, url: &str, query: &str, reply: Scripted) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry((url.to_owned(), query.to_owned()))
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(&self, request: &ApiRequest) -> Result<serde_json::Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let key = (
            request.url.clone(),
            request.query_value("query").unwrap_or_default().to_owned(),
        );
        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match next {
            Some(Scripted::Json(value)) => Ok(value),
            Some(Scripted::Status(status)) => Err(TransportError::Status {
                status,
                url: request.url.clone(),
                body: format!("status {status}"),
            }),
            Some(Scripted::Timeout) => Err(TransportError::Timeout {
                url: request.url.clone(),
            }),
            Some(Scripted::NotJson) => Err(TransportError::Decode {
                url: request.url.clone(),
                source: serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            }),
            Some(Scripted::Panic) => panic!("scripted panic for {}", key.1),
            None => Err(TransportError::Status {
                status: 404,
                url: request.url.clone(),
                body: "not scripted".to_owned(),
            }),
        }
    }
}

/// Builds a request the way the pipeline does, minus credentials.
pub(crate) fn request(url: &str, query: &str) -> ApiRequest {
    ApiRequest {
        url: url.to_owned(),
        headers: Vec::new(),
        query: vec![("query".to_owned(), query.to_owned())],
        timeout: Duration::from_secs(1),
    }
}

/// A product-detail body with every field the flattener reads.
pub(crate) fn product_json(id: i64, sku: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "sku": sku,
        "name": "Air Jordan 1 Retro High OG 'Chicago'",
        "upperMaterial": "Leather",
        "brandName": "Air Jordan",
        "category": ["Lifestyle", "Basketball"],
        "singleGender": "men",
        "localizedSpecialDisplayPriceCents": { "currency": "USD", "amount": 18000 },
        "story": "A reissue of the original colorway.",
        "details": "White/Black/Varsity Red",
        "silhouette": "Air Jordan 1",
        "productType": "sneakers",
        "color": "White",
        "releaseDate": "2015-05-30T23:59:59.999Z",
        "productTemplateExternalPictures": [
            { "mainPictureUrl": "https://img.example/0.jpg" },
            { "mainPictureUrl": "https://img.example/1.jpg" },
            { "mainPictureUrl": "https://img.example/2.jpg" },
            { "mainPictureUrl": "https://img.example/3.jpg" }
        ]
    })
}

/// A price entry body.
pub(crate) fn price_json(size: &str, last_sold: i64, lowest: Option<i64>) -> serde_json::Value {
    let lowest = match lowest {
        Some(amount) => serde_json::json!({ "currency": "USD", "amount": amount }),
        None => serde_json::json!({ "currency": "USD" }),
    };
    serde_json::json!({
        "sizeOption": { "presentation": size, "value": 0 },
        "lastSoldPriceCents": { "currency": "USD", "amount": last_sold },
        "lowestPriceCents": lowest,
    })
}

pub(crate) const PRODUCT_URL: &str = "https://catalog.test/product";
pub(crate) const PRICES_URL: &str = "https://catalog.test/prices";

/// Pipeline settings pointing at the scripted endpoints, with no retry delay.
pub(crate) fn settings(max_concurrent_jobs: usize) -> crate::pipeline::PipelineSettings {
    crate::pipeline::PipelineSettings {
        product_url: PRODUCT_URL.to_owned(),
        prices_url: PRICES_URL.to_owned(),
        api_key: "test-key".to_owned(),
        request_timeout: Duration::from_secs(40),
        retry: crate::retry::RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        },
        max_concurrent_jobs,
    }
}

/// Context over `transport` with the scripted endpoints.
pub(crate) fn context(
    transport: std::sync::Arc<dyn Transport>,
    max_concurrent_jobs: usize,
) -> std::sync::Arc<crate::pipeline::PipelineContext> {
    std::sync::Arc::new(
        crate::pipeline::PipelineContext::new(transport, settings(max_concurrent_jobs)).unwrap(),
    )
}
