//! CLI entry point for the dirgrab tool.

use anyhow::Result;
use clap::Parser;
use dirgrab_core::{DownloadOutcome, Pipeline};
use tracing::{debug, error, info};

mod app_config;
mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let loaded = app_config::load_config(args.config.as_deref())?;
    if let (Some(path), Some(_)) = (&loaded.path, &loaded.config) {
        info!(path = %path.display(), "loaded config file");
    }
    let config = app_config::build_scrape_config(&args, loaded.config.as_ref())?;

    let pipeline = Pipeline::new(config)?;
    info!(
        base_url = %pipeline.config().base_url,
        output_dir = %pipeline.config().output_dir.display(),
        "dirgrab starting"
    );

    let report = pipeline
        .run_with_observer(|target, result| match result {
            Ok(DownloadOutcome::Downloaded { .. }) => println!("Downloaded {}", target.local_name),
            Ok(_) => {}
            Err(err) => eprintln!("{err}"),
        })
        .await
        .inspect_err(|err| error!(error = %err, "aborting run"))?;

    info!(
        discovered = report.discovered,
        downloaded = report.downloaded.len(),
        skipped = report.skipped,
        failed = report.failed(),
        "Download complete"
    );

    Ok(())
}
