//! HTTP client wrapper shared by the page fetch and file downloads.
//!
//! Every request carries the browser-like identity headers and is bounded
//! by a connect timeout and a whole-request timeout.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

use super::error::DownloadError;
use crate::config::{
    DEFAULT_CONNECT_TIMEOUT_SECS as CONNECT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS as REQUEST_TIMEOUT_SECS,
};
use crate::user_agent;

/// HTTP client for listing fetches and streaming downloads.
///
/// Created once per run and reused, so connections to the listing host
/// are pooled across the whole link list.
///
/// # Example
///
/// ```no_run
/// use dirgrab_core::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let bytes = client
///     .download_to_path("https://example.com/files/a.pdf", Path::new("./a.pdf"))
///     .await?;
/// println!("wrote {bytes} bytes");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Request timeout: 5 minutes (for large files)
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the TLS backend or resolver
    /// cannot be initialized.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(request_timeout_secs))
            .default_headers(user_agent::default_headers())
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET request and returns the response whatever its status.
    ///
    /// # Errors
    ///
    /// Returns the reqwest error for build, connect, or timeout failures.
    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        debug!(url, "sending GET");
        self.client.get(url).send().await
    }

    /// Downloads `url` into a new file at `path`, returning bytes written.
    ///
    /// The file is only created once the server has answered with a
    /// success status. If streaming fails part-way the partial file is
    /// removed. The response body is released on every return path.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The request cannot be built or sent (network error, timeout)
    /// - The server returns a non-success status
    /// - Creating or writing the local file fails
    #[instrument(skip(self), fields(url = %url, path = %path.display()))]
    pub async fn download_to_path(&self, url: &str, path: &Path) -> Result<u64, DownloadError> {
        let response = self
            .get(url)
            .await
            .map_err(|e| DownloadError::from_request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let mut file = File::create(path)
            .await
            .map_err(|e| DownloadError::io(path, e))?;

        let stream_result = stream_to_file(&mut file, response, url, path).await;
        if stream_result.is_err() {
            drop(file);
            debug!(path = %path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(path).await;
        }

        stream_result
    }
}

/// Streams response body to file, returning bytes written.
///
/// Takes the response by value so the body is dropped when this returns.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
