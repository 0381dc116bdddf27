//! The `enrich` command: load identifiers, run the pipeline, export records.
//!
//! Individual product failures are logged by the pipeline and counted in the
//! run summary; only config, input and export problems fail the command.

use std::path::PathBuf;
use std::sync::Arc;

use sizerun_scraper::{run_pipeline, HttpTransport, PipelineContext, PipelineSettings};

use crate::{export, input};

#[derive(Debug)]
pub(crate) struct EnrichArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub field: String,
    pub concurrency: Option<usize>,
    pub dry_run: bool,
}

/// Enriches every identifier in `args.input` and writes the flattened records
/// to `args.output`.
///
/// When `dry_run` is `true` the identifiers are printed and no request is
/// made.
///
/// # Errors
///
/// Returns an error if the input file cannot be read or parsed, the pipeline
/// settings are invalid, the HTTP client cannot be built, or the output file
/// cannot be written.
pub(crate) async fn run_enrich(
    config: &sizerun_core::AppConfig,
    args: &EnrichArgs,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", args.input.display()))?;
    let identifiers = input::parse_identifiers(&raw, &args.field)?;

    if args.dry_run {
        println!(
            "dry-run: would enrich {} identifiers into {}",
            identifiers.len(),
            args.output.display()
        );
        for identifier in &identifiers {
            println!("  {identifier}");
        }
        return Ok(());
    }

    let mut settings = PipelineSettings::from_app_config(config);
    if let Some(concurrency) = args.concurrency {
        settings.max_concurrent_jobs = concurrency;
    }

    let transport = HttpTransport::new(&config.user_agent)?;
    let ctx = Arc::new(PipelineContext::new(Arc::new(transport), settings)?);

    let report = run_pipeline(ctx, identifiers).await;
    if report.summary.failed > 0 {
        tracing::warn!(
            failed = report.summary.failed,
            jobs = report.summary.jobs,
            "some products failed enrichment"
        );
    }

    export::write_output(&args.output, &report.records)?;
    println!("wrote {} to {}", report.summary, args.output.display());
    Ok(())
}
