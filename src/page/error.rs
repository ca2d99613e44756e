//! Error types for the listing page fetch.

use thiserror::Error;

/// Errors that leave the pipeline without a listing document.
///
/// None of these are fatal: the pipeline logs them and carries on with
/// an empty link set.
#[derive(Debug, Error)]
pub enum PageError {
    /// The request could not be built from the URL.
    #[error("failed to create request for {url}: {source}")]
    InvalidRequest {
        /// The listing URL.
        url: String,
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Transport failure (DNS, connect, TLS).
    #[error("HTTP request to {url} failed: {source}")]
    Network {
        /// The listing URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The request exceeded its timeout.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The listing URL.
        url: String,
    },

    /// Any status other than 200.
    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus {
        /// The listing URL.
        url: String,
        /// The status received.
        status: u16,
    },

    /// The body could not be read or decoded as markup.
    #[error("failed to parse HTML from {url}: {source}")]
    Body {
        /// The listing URL.
        url: String,
        /// The underlying read/decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl PageError {
    /// Classifies a reqwest error raised while sending the page request.
    pub fn from_request(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else if source.is_builder() {
            Self::InvalidRequest { url, source }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates a status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a body read/decode error.
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Body {
            url: url.into(),
            source,
        }
    }
}
