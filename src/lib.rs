//! Dirgrab Core Library
//!
//! Fetches a single web directory listing, discovers the files it links to,
//! and downloads the ones worth keeping into a local directory. Files that
//! already exist locally are skipped, so re-running is cheap.
//!
//! # Architecture
//!
//! - [`page`] - Listing fetch, anchor extraction, and directory-link filtering
//! - [`download`] - HTTP client, local naming rules, and the per-file downloader
//! - [`pipeline`] - Wires the stages together for one sequential run
//! - [`config`] - Explicit run configuration with the historical defaults

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod page;
pub mod pipeline;
mod user_agent;

// Re-export commonly used types
pub use config::{ConfigError, NamingStrategy, ScrapeConfig};
pub use download::{
    DownloadError, DownloadOutcome, DownloadTarget, Downloader, HttpClient, extension_of,
    sanitize_name,
};
pub use page::{LinkFilter, PageError, extract_links, fetch_page, filter_files};
pub use pipeline::{Pipeline, PipelineError, PipelineReport};
pub use user_agent::{ACCEPT_HTML, BROWSER_USER_AGENT};
