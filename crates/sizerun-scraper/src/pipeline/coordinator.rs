//! Fan-out of enrichment jobs behind a counting admission gate.

use std::sync::Arc;

use sizerun_core::VariantRecord;
use tokio::task::JoinSet;

use super::job::{enrich_product, JobOutcome};
use super::PipelineContext;
use crate::error::ScraperError;

/// Per-outcome job counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub jobs: usize,
    pub enriched: usize,
    pub no_prices: usize,
    pub skipped: usize,
    pub failed: usize,
    pub records: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records from {} products ({} enriched, {} without prices, {} skipped, {} failed)",
            self.records, self.jobs, self.enriched, self.no_prices, self.skipped, self.failed
        )
    }
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Records of all jobs, grouped per product in job completion order.
    pub records: Vec<VariantRecord>,
    pub summary: RunSummary,
}

impl RunReport {
    fn absorb(&mut self, identifier: &str, result: Result<JobOutcome, ScraperError>) {
        match result {
            Ok(outcome) => {
                match &outcome {
                    JobOutcome::Enriched { .. } => self.summary.enriched += 1,
                    JobOutcome::NoPrices { .. } => self.summary.no_prices += 1,
                    JobOutcome::Skipped { .. } => self.summary.skipped += 1,
                }
                let records = outcome.into_records();
                self.summary.records += records.len();
                self.records.extend(records);
            }
            Err(e) => {
                tracing::warn!(identifier, error = %e, "enrichment job failed");
                self.summary.failed += 1;
            }
        }
    }
}

/// Enriches every identifier and concatenates the resulting records.
///
/// All jobs are spawned up front. Each one waits on the context's admission
/// gate before its first request and holds its permit until it finishes, so
/// at most [`PipelineContext::max_concurrent_jobs`] jobs are active at once.
///
/// A failing or panicking job is logged and counted in
/// [`RunSummary::failed`]; it never affects sibling jobs. Record order across
/// products follows job completion, not `identifiers` order.
pub async fn run_pipeline(ctx: Arc<PipelineContext>, identifiers: Vec<String>) -> RunReport {
    let mut report = RunReport::default();
    report.summary.jobs = identifiers.len();

    if identifiers.is_empty() {
        tracing::info!("no identifiers to enrich");
        return report;
    }

    tracing::info!(
        jobs = identifiers.len(),
        max_concurrent = ctx.max_concurrent_jobs(),
        "starting enrichment run"
    );

    let mut jobs = JoinSet::new();
    for identifier in identifiers {
        let ctx = Arc::clone(&ctx);
        jobs.spawn(async move {
            // `acquire_owned` only errors on a closed semaphore and the gate
            // is never closed. The permit drops when the job returns or unwinds.
            let _permit = ctx.gate().acquire_owned().await.ok();
            let result = enrich_product(&ctx, &identifier).await;
            (identifier, result)
        });
    }

    while let Some(joined) = jobs.join_next().await {
        match joined {
            Ok((identifier, result)) => report.absorb(&identifier, result),
            Err(e) => {
                tracing::error!(error = %e, "enrichment job panicked");
                report.summary.failed += 1;
            }
        }
    }

    tracing::info!(summary = %report.summary, "enrichment run finished");
    report
}
