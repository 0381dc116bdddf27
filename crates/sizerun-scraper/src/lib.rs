pub mod error;
pub mod flatten;
pub mod photos;
pub mod pipeline;
pub mod retry;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ScraperError, TransportError};
pub use flatten::flatten_product;
pub use photos::{select_photos, PREFERRED_PHOTO_POSITIONS};
pub use pipeline::{
    enrich_product, run_pipeline, JobOutcome, JobState, PipelineContext, PipelineSettings,
    RunReport, RunSummary,
};
pub use retry::{fetch_with_retry, FetchOutcome, MissingData, RetryPolicy};
pub use transport::{ApiRequest, HttpTransport, Transport};
pub use types::{CatalogPicture, CatalogProduct, PriceEntry};
