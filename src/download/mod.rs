//! File downloads for discovered listing entries.
//!
//! # Features
//!
//! - Extension allow-list and already-downloaded gates before any request
//! - Streaming downloads (memory-efficient for large files)
//! - Raw or sanitized local naming
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use dirgrab_core::download::{DownloadTarget, Downloader, HttpClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = Downloader::new(HttpClient::new(), [".pdf"]);
//! let outcome = downloader
//!     .download(
//!         "https://example.com/sheets/",
//!         &DownloadTarget::raw("acetone.pdf"),
//!         Path::new("./Assets"),
//!     )
//!     .await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod client;
mod downloader;
mod error;
mod filename;

pub use client::HttpClient;
pub use downloader::{DownloadOutcome, DownloadTarget, Downloader};
pub use error::DownloadError;
pub use filename::{extension_of, sanitize_name};
