//! Request identity headers shared by page and file fetches.
//!
//! Some listing servers answer 406 to clients without a browser-like
//! User-Agent and an explicit `Accept`, so every request carries both.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

/// Browser-compatible User-Agent sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (compatible; MyGoScraper/1.0)";

/// Accept header sent with every request.
pub const ACCEPT_HTML: &str = "text/html";

/// Default headers installed on the shared HTTP client.
#[must_use]
pub(crate) fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers
}
