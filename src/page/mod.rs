//! Listing page discovery: fetch, anchor extraction, and link filtering.
//!
//! ```no_run
//! use dirgrab_core::{HttpClient, extract_links, fetch_page, filter_files};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let document = fetch_page(&client, "https://example.com/files/").await?;
//! let files = filter_files(extract_links(&document));
//! println!("{files:?}");
//! # Ok(())
//! # }
//! ```

mod error;
mod fetch;
mod filter;
mod links;

pub use error::PageError;
pub use fetch::fetch_page;
pub use filter::{LinkFilter, filter_files};
pub use links::{extract_links, extract_links_with_depth};
