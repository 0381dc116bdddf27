//! Concurrent product enrichment.
//!
//! A [`PipelineContext`] bundles everything a job needs (transport handle,
//! admission gate, endpoints, credential, request settings) and is shared by
//! `Arc` across all jobs of a run. [`run_pipeline`] fans identifiers out into
//! [`enrich_product`] jobs and gathers their records.

mod coordinator;
mod job;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::error::ScraperError;
use crate::retry::RetryPolicy;
use crate::transport::{ApiRequest, Transport};

pub use coordinator::{run_pipeline, RunReport, RunSummary};
pub use job::{enrich_product, JobOutcome, JobState};

/// Header carrying the catalog credential.
const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter both endpoints are keyed on.
const QUERY_PARAM: &str = "query";

/// Endpoint, credential and request settings for a run.
#[derive(Clone)]
pub struct PipelineSettings {
    pub product_url: String,
    pub prices_url: String,
    pub api_key: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    /// Admission gate size. Values below 1 behave as 1.
    pub max_concurrent_jobs: usize,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_app_config(config: &sizerun_core::AppConfig) -> Self {
        Self {
            product_url: config.product_url.clone(),
            prices_url: config.prices_url.clone(),
            api_key: config.api_key.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            retry: RetryPolicy {
                max_attempts: config.max_attempts,
                delay: Duration::from_millis(config.retry_delay_ms),
            },
            max_concurrent_jobs: config.max_concurrent_jobs,
        }
    }
}

impl std::fmt::Debug for PipelineSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineSettings")
            .field("product_url", &self.product_url)
            .field("prices_url", &self.prices_url)
            .field("api_key", &"[redacted]")
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .field("max_concurrent_jobs", &self.max_concurrent_jobs)
            .finish()
    }
}

/// Shared state handed to every enrichment job of a run.
pub struct PipelineContext {
    transport: Arc<dyn Transport>,
    gate: Arc<Semaphore>,
    settings: PipelineSettings,
}

impl PipelineContext {
    /// Builds a context around `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidEndpoint`] if either endpoint URL in
    /// `settings` does not parse.
    pub fn new(
        transport: Arc<dyn Transport>,
        settings: PipelineSettings,
    ) -> Result<Self, ScraperError> {
        for url in [&settings.product_url, &settings.prices_url] {
            reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidEndpoint {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        }

        let permits = settings.max_concurrent_jobs.max(1);
        Ok(Self {
            transport,
            gate: Arc::new(Semaphore::new(permits)),
            settings,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Number of jobs allowed to run at once.
    #[must_use]
    pub fn max_concurrent_jobs(&self) -> usize {
        self.settings.max_concurrent_jobs.max(1)
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub(crate) fn gate(&self) -> Arc<Semaphore> {
        Arc::clone(&self.gate)
    }

    pub(crate) fn product_request(&self, identifier: &str) -> ApiRequest {
        self.request(&self.settings.product_url, identifier)
    }

    pub(crate) fn prices_request(&self, product_id: &str) -> ApiRequest {
        self.request(&self.settings.prices_url, product_id)
    }

    fn request(&self, url: &str, query: &str) -> ApiRequest {
        ApiRequest {
            url: url.to_owned(),
            headers: vec![(API_KEY_HEADER.to_owned(), self.settings.api_key.clone())],
            query: vec![(QUERY_PARAM.to_owned(), query.to_owned())],
            timeout: self.settings.request_timeout,
        }
    }
}
