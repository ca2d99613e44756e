//! Error types for the download module.
//!
//! Every variant carries the URL or local path it concerns, so a logged
//! error line is enough to diagnose the failure after the run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a single file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The request could not be built (malformed URL after concatenation).
    #[error("invalid request for {url}: {source}")]
    InvalidRequest {
        /// The URL that could not be requested.
        url: String,
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Server answered with a non-success status.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while creating or writing the local file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The local name would resolve outside the output directory.
    #[error("refusing unsafe local name '{name}'")]
    UnsafeName {
        /// The rejected local name.
        name: String,
    },
}

impl DownloadError {
    /// Classifies a reqwest error raised while sending a request.
    pub fn from_request(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else if source.is_builder() {
            Self::InvalidRequest {
                url: url.into(),
                source,
            }
        } else {
            Self::network(url, source)
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an unsafe-name error.
    pub fn unsafe_name(name: impl Into<String>) -> Self {
        Self::UnsafeName { name: name.into() }
    }
}

// No From<reqwest::Error> / From<std::io::Error>: the variants need the URL
// or path, which the source errors don't carry.
