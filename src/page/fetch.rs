//! Listing page fetch.

use reqwest::StatusCode;
use scraper::Html;
use tracing::{debug, instrument};

use super::error::PageError;
use crate::download::HttpClient;

/// Fetches `url` and parses the body as an HTML document.
///
/// The client sends the browser-like `User-Agent` and `Accept: text/html`
/// headers; listing servers that reject bare clients answer 406 otherwise.
/// Only a 200 response is accepted.
///
/// The HTML parser recovers from malformed markup, so recoverable parse
/// problems are logged at debug level rather than returned.
///
/// # Errors
///
/// Returns `PageError` if the request cannot be built or sent, the status
/// is not 200, or the body cannot be read.
#[instrument(skip(client))]
pub async fn fetch_page(client: &HttpClient, url: &str) -> Result<Html, PageError> {
    let response = client
        .get(url)
        .await
        .map_err(|e| PageError::from_request(url, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(PageError::http_status(url, status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| PageError::body(url, e))?;

    let document = Html::parse_document(&body);
    if !document.errors.is_empty() {
        debug!(
            errors = document.errors.len(),
            "listing markup parsed with recoverable errors"
        );
    }
    debug!(bytes = body.len(), "listing page parsed");
    Ok(document)
}
