//! Enrichment of a single product identifier.

use sizerun_core::VariantRecord;

use super::PipelineContext;
use crate::error::ScraperError;
use crate::flatten::flatten_product;
use crate::retry::{fetch_with_retry, FetchOutcome, MissingData};
use crate::types::{CatalogProduct, PriceEntry};

/// Where a job is in its lifecycle.
///
/// ```text
/// Pending → FetchingProduct → FetchingPrices → Flattening → Done
///                 └──────────→ Skipped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    FetchingProduct,
    FetchingPrices,
    Flattening,
    Done,
    Skipped,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Pending => write!(f, "pending"),
            JobState::FetchingProduct => write!(f, "fetching_product"),
            JobState::FetchingPrices => write!(f, "fetching_prices"),
            JobState::Flattening => write!(f, "flattening"),
            JobState::Done => write!(f, "done"),
            JobState::Skipped => write!(f, "skipped"),
        }
    }
}

/// How a job that did not fail ended.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// Product and prices fetched; one record per distinct size.
    Enriched { records: Vec<VariantRecord> },
    /// Product fetched but the price list was missing or empty.
    NoPrices { cause: MissingData },
    /// Product detail could not be fetched; nothing else was attempted.
    Skipped { cause: MissingData },
}

impl JobOutcome {
    #[must_use]
    pub fn final_state(&self) -> JobState {
        match self {
            JobOutcome::Enriched { .. } | JobOutcome::NoPrices { .. } => JobState::Done,
            JobOutcome::Skipped { .. } => JobState::Skipped,
        }
    }

    /// Records contributed to the result set (empty unless `Enriched`).
    #[must_use]
    pub fn into_records(self) -> Vec<VariantRecord> {
        match self {
            JobOutcome::Enriched { records } => records,
            JobOutcome::NoPrices { .. } | JobOutcome::Skipped { .. } => Vec::new(),
        }
    }
}

/// Runs the two dependent fetches for `identifier` and flattens the result.
///
/// 1. Product detail, queried by `identifier`. No data → `Skipped`.
/// 2. Price list, queried by the product's `id`. No data → `NoPrices`.
/// 3. [`flatten_product`] → `Enriched`.
///
/// An empty JSON document (`null`, `{}`, `[]`) counts as no data.
///
/// # Errors
///
/// - [`ScraperError::Transport`] for non-retriable transport failures.
/// - [`ScraperError::Deserialize`] when a body does not match the expected shape.
/// - [`ScraperError::MalformedProductData`] when required product fields are missing.
pub async fn enrich_product(
    ctx: &PipelineContext,
    identifier: &str,
) -> Result<JobOutcome, ScraperError> {
    let mut state = JobState::Pending;
    advance(&mut state, JobState::FetchingProduct, identifier);

    let product_request = ctx.product_request(identifier);
    let product_outcome =
        fetch_with_retry(ctx.transport(), &product_request, &ctx.settings().retry).await?;
    let product_json = match into_document(product_outcome) {
        Ok(json) => json,
        Err(cause) => {
            advance(&mut state, JobState::Skipped, identifier);
            tracing::info!(identifier, %cause, "no product data, skipping");
            return Ok(JobOutcome::Skipped { cause });
        }
    };

    let product: CatalogProduct =
        serde_json::from_value(product_json).map_err(|e| ScraperError::Deserialize {
            context: format!("product detail for {identifier}"),
            source: e,
        })?;
    let product_id = product
        .id
        .as_ref()
        .ok_or_else(|| ScraperError::MalformedProductData {
            product: identifier.to_owned(),
            reason: "missing id".to_owned(),
        })?
        .to_string();

    advance(&mut state, JobState::FetchingPrices, identifier);

    let prices_request = ctx.prices_request(&product_id);
    let prices_outcome =
        fetch_with_retry(ctx.transport(), &prices_request, &ctx.settings().retry).await?;
    let prices_json = match into_document(prices_outcome) {
        Ok(json) => json,
        Err(cause) => {
            advance(&mut state, JobState::Done, identifier);
            tracing::info!(identifier, product_id = %product_id, %cause, "no price data");
            return Ok(JobOutcome::NoPrices { cause });
        }
    };

    let prices: Vec<PriceEntry> =
        serde_json::from_value(prices_json).map_err(|e| ScraperError::Deserialize {
            context: format!("price list for product {product_id}"),
            source: e,
        })?;

    advance(&mut state, JobState::Flattening, identifier);
    let records = flatten_product(&product, &prices)?;

    advance(&mut state, JobState::Done, identifier);
    tracing::debug!(
        identifier,
        product_id = %product_id,
        records = records.len(),
        "product enriched"
    );
    Ok(JobOutcome::Enriched { records })
}

fn advance(state: &mut JobState, next: JobState, identifier: &str) {
    tracing::debug!(identifier, from = %state, to = %next, "job state");
    *state = next;
}

/// Unwraps fetched data, treating an empty JSON document like missing data.
fn into_document(outcome: FetchOutcome) -> Result<serde_json::Value, MissingData> {
    match outcome {
        FetchOutcome::Data(value) if is_empty_document(&value) => Err(MissingData::Empty),
        FetchOutcome::Data(value) => Ok(value),
        FetchOutcome::Missing(cause) => Err(cause),
    }
}

fn is_empty_document(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
