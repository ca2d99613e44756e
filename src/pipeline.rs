//! End-to-end run: listing fetch, link discovery, and sequential downloads.
//!
//! # Overview
//!
//! 1. Fetch the listing at `base_url` (failure leaves an empty link set)
//! 2. Extract anchor targets and drop directory-like links
//! 3. Map each link to a [`DownloadTarget`] with the configured naming rule
//! 4. Create the output directory (the only fatal step)
//! 5. Download each target in document order; per-file failures are
//!    recorded and the loop continues
//!
//! # Example
//!
//! ```no_run
//! use dirgrab_core::{Pipeline, ScrapeConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(ScrapeConfig::default())?;
//! let report = pipeline.run().await?;
//! println!("downloaded {}, skipped {}", report.downloaded.len(), report.skipped);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::{ConfigError, ScrapeConfig};
use crate::download::{DownloadError, DownloadOutcome, DownloadTarget, Downloader, HttpClient};
use crate::page::{LinkFilter, PageError, extract_links_with_depth, fetch_page};

/// Fatal pipeline errors. Everything else is reported per file.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Summary of a completed run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Why the listing could not be used, if it could not.
    pub page_error: Option<PageError>,
    /// Targets left after filtering.
    pub discovered: usize,
    /// Files written this run.
    pub downloaded: Vec<PathBuf>,
    /// Targets skipped by the extension or existence gate.
    pub skipped: usize,
    /// Per-file failures, in the order they happened.
    pub failures: Vec<(DownloadTarget, DownloadError)>,
}

impl PipelineReport {
    /// Number of failed targets.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// A configured scrape, ready to run.
#[derive(Debug)]
pub struct Pipeline {
    config: ScrapeConfig,
    client: HttpClient,
    downloader: Downloader,
}

impl Pipeline {
    /// Validates `config` and builds the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for invalid configuration and
    /// [`PipelineError::HttpClient`] if the client cannot be built.
    pub fn new(config: ScrapeConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let client =
            HttpClient::with_timeouts(config.connect_timeout_secs, config.request_timeout_secs)
                .map_err(PipelineError::HttpClient)?;
        let downloader = Downloader::new(client.clone(), &config.allowed_extensions);
        Ok(Self {
            config,
            client,
            downloader,
        })
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Runs the pipeline without a per-target observer.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::OutputDir`] if the output directory cannot
    /// be created.
    pub async fn run(&self) -> Result<PipelineReport, PipelineError> {
        self.run_with_observer(|_, _| {}).await
    }

    /// Runs the pipeline, calling `observe` after each target is handled.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::OutputDir`] if the output directory cannot
    /// be created. Page and per-file failures are recorded in the report.
    #[instrument(skip(self, observe), fields(base_url = %self.config.base_url))]
    pub async fn run_with_observer<F>(&self, mut observe: F) -> Result<PipelineReport, PipelineError>
    where
        F: FnMut(&DownloadTarget, &Result<DownloadOutcome, DownloadError>),
    {
        let mut report = PipelineReport::default();

        let targets = match self.discover().await {
            Ok(targets) => targets,
            Err(error) => {
                warn!(error = %error, "listing unavailable, nothing to download");
                report.page_error = Some(error);
                Vec::new()
            }
        };
        report.discovered = targets.len();
        info!(targets = targets.len(), "discovered download targets");

        create_output_dir(&self.config.output_dir).await?;

        for target in targets {
            let result = self
                .downloader
                .download(&self.config.base_url, &target, &self.config.output_dir)
                .await;
            observe(&target, &result);

            match result {
                Ok(DownloadOutcome::Downloaded { path, .. }) => report.downloaded.push(path),
                Ok(_) => report.skipped += 1,
                Err(error) => {
                    warn!(name = %target.remote_name, error = %error, "download failed");
                    report.failures.push((target, error));
                }
            }
        }

        info!(
            downloaded = report.downloaded.len(),
            skipped = report.skipped,
            failed = report.failed(),
            "run complete"
        );
        Ok(report)
    }

    /// Fetches the listing and returns the filtered, named targets.
    ///
    /// # Errors
    ///
    /// Returns the [`PageError`] if the listing cannot be fetched.
    pub async fn discover(&self) -> Result<Vec<DownloadTarget>, PageError> {
        if !self.config.base_url.ends_with('/') {
            warn!(
                base_url = %self.config.base_url,
                "base URL has no trailing '/', file URLs are plain concatenations"
            );
        }

        let links = {
            let document = fetch_page(&self.client, &self.config.base_url).await?;
            extract_links_with_depth(&document, self.config.max_depth)
        };
        debug!(links = links.len(), "extracted anchor targets");

        let filter = LinkFilter {
            skip_query_links: self.config.skip_query_links,
        };
        Ok(filter
            .apply(links)
            .into_iter()
            .map(|link| DownloadTarget {
                local_name: self.config.naming.local_name(&link),
                remote_name: link,
            })
            .collect())
    }
}

#[cfg(unix)]
async fn create_output_dir(path: &Path) -> Result<(), PipelineError> {
    tokio::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(path)
        .await
        .map_err(|source| PipelineError::OutputDir {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(not(unix))]
async fn create_output_dir(path: &Path) -> Result<(), PipelineError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| PipelineError::OutputDir {
            path: path.to_path_buf(),
            source,
        })
}
