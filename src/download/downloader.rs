//! Per-file download with allow-list and existence gates.
//!
//! A target is checked in a fixed order: extension allow-list, local
//! name safety, then whether a regular file already sits at the local
//! path. Only targets passing all three reach the network.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use super::client::HttpClient;
use super::error::DownloadError;
use super::filename::{extension_of, is_safe_relative_name};

/// A link that survived filtering, paired with its local file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    /// Appended verbatim to the base URL.
    pub remote_name: String,
    /// Joined onto the output directory.
    pub local_name: String,
}

impl DownloadTarget {
    /// Creates a target whose local name is the link itself.
    #[must_use]
    pub fn raw(link: impl Into<String>) -> Self {
        let link = link.into();
        Self {
            local_name: link.clone(),
            remote_name: link,
        }
    }
}

/// Result of a download attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was fetched and written in full.
    Downloaded {
        /// Where it was written.
        path: PathBuf,
        /// Bytes written.
        bytes: u64,
    },
    /// The remote name's extension is not on the allow-list.
    SkippedExtension {
        /// The rejected extension (empty when there is none).
        extension: String,
    },
    /// A regular file already exists at the local path.
    SkippedExisting {
        /// The existing file.
        path: PathBuf,
    },
}

impl DownloadOutcome {
    /// Returns true for either skip variant.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        !matches!(self, Self::Downloaded { .. })
    }
}

/// Downloads individual targets into an output directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: HttpClient,
    allowed_extensions: HashSet<String>,
}

impl Downloader {
    /// Creates a downloader with the given lower-cased extension allow-list.
    #[must_use]
    pub fn new<I, S>(client: HttpClient, allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            client,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns true if `extension` (lower-cased, with dot) may be downloaded.
    #[must_use]
    pub fn is_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions.contains(extension)
    }

    /// Downloads one target unless a policy gate turns it into a no-op.
    ///
    /// The URL is `base_url` with `target.remote_name` appended as-is; the
    /// local path is `output_dir` joined with `target.local_name`.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` for an unsafe local name, request failures,
    /// non-success statuses, and file creation or write failures. A
    /// directory sitting at the local path is not treated as an existing
    /// download, so it surfaces here as an IO error.
    #[instrument(skip(self, target, output_dir), fields(name = %target.remote_name))]
    pub async fn download(
        &self,
        base_url: &str,
        target: &DownloadTarget,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        let extension = extension_of(&target.remote_name);
        if !self.is_allowed(&extension) {
            info!(
                name = %target.remote_name,
                extension = %extension,
                "skipping, extension not allowed"
            );
            return Ok(DownloadOutcome::SkippedExtension { extension });
        }

        if !is_safe_relative_name(&target.local_name) {
            return Err(DownloadError::unsafe_name(&target.local_name));
        }

        let path = output_dir.join(&target.local_name);
        if is_regular_file(&path).await {
            info!(path = %path.display(), "file already exists, skipping download");
            return Ok(DownloadOutcome::SkippedExisting { path });
        }

        let url = format!("{base_url}{}", target.remote_name);
        let bytes = self.client.download_to_path(&url, &path).await?;

        info!(path = %path.display(), bytes, "download complete");
        Ok(DownloadOutcome::Downloaded { path, bytes })
    }
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn downloader() -> Downloader {
        Downloader::new(HttpClient::new(), [".pdf", ".EXE"])
    }

    #[test]
    fn test_allow_list_is_case_normalized() {
        let d = downloader();
        assert!(d.is_allowed(".pdf"));
        assert!(d.is_allowed(".exe"));
        assert!(!d.is_allowed(".html"));
        assert!(!d.is_allowed(""));
    }

    #[test]
    fn test_raw_target_uses_link_for_both_names() {
        let target = DownloadTarget::raw("a.pdf");
        assert_eq!(target.remote_name, "a.pdf");
        assert_eq!(target.local_name, "a.pdf");
    }

    // The base URL is unroutable: reaching the network would fail, so a
    // skip proves the gate ran first.
    #[tokio::test]
    async fn test_disallowed_extension_is_noop_without_network() {
        let temp = TempDir::new().unwrap();
        let outcome = downloader()
            .download(
                "http://127.0.0.1:9/",
                &DownloadTarget::raw("index.html"),
                temp.path(),
            )
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DownloadOutcome::SkippedExtension {
                extension: ".html".to_string()
            }
        );
        assert!(!temp.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn test_existing_file_is_noop_without_network() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("have.pdf"), b"old").unwrap();

        let outcome = downloader()
            .download(
                "http://127.0.0.1:9/",
                &DownloadTarget::raw("have.pdf"),
                temp.path(),
            )
            .await
            .unwrap();
        assert!(outcome.is_skip());
        assert_eq!(
            std::fs::read(temp.path().join("have.pdf")).unwrap(),
            b"old"
        );
    }

    #[tokio::test]
    async fn test_unsafe_local_name_is_rejected() {
        let temp = TempDir::new().unwrap();
        let result = downloader()
            .download(
                "http://127.0.0.1:9/",
                &DownloadTarget::raw("../escape.pdf"),
                temp.path(),
            )
            .await;
        assert!(matches!(result, Err(DownloadError::UnsafeName { .. })));
    }
}
