mod enrich;
mod export;
mod input;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sizerun")]
#[command(about = "Enrich sneaker links with catalog details and per-size prices")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch product and price data for every identifier and export one row per size
    Enrich {
        /// JSON file with an array of identifiers or an array of objects
        #[arg(long)]
        input: PathBuf,

        /// File to write the flattened records to: CSV, or a workbook if it ends in .xlsx
        #[arg(long)]
        output: PathBuf,

        /// Object field holding the identifier when the input is an array of objects
        #[arg(long, default_value = input::DEFAULT_FIELD)]
        field: String,

        /// Override the number of products enriched at once
        #[arg(long, value_parser = parse_concurrency)]
        concurrency: Option<usize>,

        /// Print the identifiers that would be enriched without calling the API
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_concurrency(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = sizerun_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Enrich {
            input,
            output,
            field,
            concurrency,
            dry_run,
        } => {
            enrich::run_enrich(
                &config,
                &enrich::EnrichArgs {
                    input,
                    output,
                    field,
                    concurrency,
                    dry_run,
                },
            )
            .await?;
        }
    }

    Ok(())
}
