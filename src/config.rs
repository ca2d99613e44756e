//! Run configuration for a listing scrape.
//!
//! Every value that used to be a hard-coded constant lives here, with
//! defaults matching the historical fixed behaviour: the MSDS listing URL,
//! an `Assets/` output directory, raw link names, and the union
//! extension allow-list.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::download::sanitize_name;

/// Listing page scraped when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.birschindustries.com/MSDS%20Sheets/";

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "Assets/";

/// Extension forced onto sanitized names.
pub const DEFAULT_FORCED_EXTENSION: &str = ".pdf";

/// Default HTTP connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default whole-request timeout (5 minutes for large files).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Upper bound accepted for either timeout.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Deepest DOM level the link walk descends to.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Extensions eligible for download by default.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    // archives and installers
    ".zip", ".gz", ".xz", ".dmg", ".exe", ".apk", ".mar", ".idsig", ".bspatch",
    // signatures and text
    ".asc", ".asc-ma1", ".asc-pierov", ".txt",
    // office documents
    ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".csv",
    // images
    ".jpg", ".jpeg", ".png", ".gif", ".bmp",
    ".pdf",
];

/// Errors from validating a [`ScrapeConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("invalid base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
    },

    /// The base URL uses something other than http or https.
    #[error("unsupported scheme '{scheme}' in base URL {url}")]
    UnsupportedScheme {
        /// The rejected URL.
        url: String,
        /// Its scheme.
        scheme: String,
    },

    /// A timeout is zero or above [`MAX_TIMEOUT_SECS`].
    #[error("invalid {field}: {value}. Expected range: 1..={MAX_TIMEOUT_SECS}")]
    InvalidTimeout {
        /// Config field name.
        field: &'static str,
        /// Rejected value.
        value: u64,
    },

    /// The allow-list is empty, so nothing could ever be downloaded.
    #[error("extension allow-list is empty")]
    EmptyAllowList,

    /// An extension is not of the form `.ext` in lower case.
    #[error("invalid extension '{extension}': expected a lower-case value starting with '.'")]
    InvalidExtension {
        /// The rejected extension.
        extension: String,
    },

    /// The DOM walk depth limit is zero.
    #[error("max_depth must be at least 1")]
    InvalidDepth,
}

/// How a link target becomes a local file name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamingStrategy {
    /// Keep the link text as the file name.
    #[default]
    Raw,
    /// Normalize to `[a-z0-9_]` and force the given extension.
    Sanitized {
        /// Extension appended when missing, including the leading dot.
        extension: String,
    },
}

impl NamingStrategy {
    /// Sanitized naming with the default forced extension (`.pdf`).
    #[must_use]
    pub fn sanitized() -> Self {
        Self::Sanitized {
            extension: DEFAULT_FORCED_EXTENSION.to_string(),
        }
    }

    /// Maps a link target to the local file name.
    #[must_use]
    pub fn local_name(&self, link: &str) -> String {
        match self {
            Self::Raw => link.to_string(),
            Self::Sanitized { extension } => sanitize_name(link, extension),
        }
    }
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Listing page URL. File URLs are this string with the link appended.
    pub base_url: String,
    /// Directory downloads are written to.
    pub output_dir: PathBuf,
    /// Local naming rule.
    pub naming: NamingStrategy,
    /// Lower-cased extensions (with leading dot) eligible for download.
    pub allowed_extensions: Vec<String>,
    /// Also drop links starting with `?` (column-sort links on server listings).
    pub skip_query_links: bool,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Depth limit for the DOM walk.
    pub max_depth: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            naming: NamingStrategy::Raw,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            skip_query_links: false,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ScrapeConfig {
    /// Checks values against the ranges the pipeline relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.base_url).map_err(|_| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                url: self.base_url.clone(),
                scheme: parsed.scheme().to_string(),
            });
        }

        validate_timeout("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout("request_timeout_secs", self.request_timeout_secs)?;

        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::EmptyAllowList);
        }
        for extension in &self.allowed_extensions {
            validate_extension(extension)?;
        }
        if let NamingStrategy::Sanitized { extension } = &self.naming {
            validate_extension(extension)?;
        }

        if self.max_depth == 0 {
            return Err(ConfigError::InvalidDepth);
        }
        Ok(())
    }
}

/// Normalizes user-supplied extensions: trims, lower-cases, adds the dot.
///
/// `"PDF"`, `".pdf"` and `" .Pdf "` all become `".pdf"`.
#[must_use]
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim().to_lowercase();
    if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{trimmed}")
    }
}

fn validate_timeout(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if (1..=MAX_TIMEOUT_SECS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeout { field, value })
    }
}

fn validate_extension(extension: &str) -> Result<(), ConfigError> {
    let valid = extension.len() > 1
        && extension.starts_with('.')
        && extension == extension.to_lowercase()
        && !extension.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidExtension {
            extension: extension.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_fixed_constants() {
        let config = ScrapeConfig::default();
        assert_eq!(
            config.base_url,
            "https://www.birschindustries.com/MSDS%20Sheets/"
        );
        assert_eq!(config.output_dir, PathBuf::from("Assets/"));
        assert_eq!(config.naming, NamingStrategy::Raw);
        assert!(!config.skip_query_links);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_allow_list_is_union_of_variants() {
        let config = ScrapeConfig::default();
        for ext in [
            ".zip", ".exe", ".asc-ma1", ".asc-pierov", ".txt", ".doc", ".docx", ".pdf", ".jpg",
            ".bspatch",
        ] {
            assert!(
                config.allowed_extensions.iter().any(|e| e == ext),
                "missing {ext}"
            );
        }
        assert!(!config.allowed_extensions.iter().any(|e| e == ".html"));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = ScrapeConfig {
            base_url: "not a url".to_string(),
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = ScrapeConfig {
            base_url: "ftp://example.com/pub/".to_string(),
            ..ScrapeConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedScheme {
                url: "ftp://example.com/pub/".to_string(),
                scheme: "ftp".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_and_huge_timeouts() {
        let zero = ScrapeConfig {
            connect_timeout_secs: 0,
            ..ScrapeConfig::default()
        };
        assert_eq!(
            zero.validate(),
            Err(ConfigError::InvalidTimeout {
                field: "connect_timeout_secs",
                value: 0
            })
        );

        let huge = ScrapeConfig {
            request_timeout_secs: MAX_TIMEOUT_SECS + 1,
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(ConfigError::InvalidTimeout {
                field: "request_timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_and_malformed_extensions() {
        let empty = ScrapeConfig {
            allowed_extensions: Vec::new(),
            ..ScrapeConfig::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::EmptyAllowList));

        let no_dot = ScrapeConfig {
            allowed_extensions: vec!["pdf".to_string()],
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            no_dot.validate(),
            Err(ConfigError::InvalidExtension { .. })
        ));

        let upper = ScrapeConfig {
            naming: NamingStrategy::Sanitized {
                extension: ".PDF".to_string(),
            },
            ..ScrapeConfig::default()
        };
        assert!(matches!(
            upper.validate(),
            Err(ConfigError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let config = ScrapeConfig {
            max_depth: 0,
            ..ScrapeConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDepth));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("PDF"), ".pdf");
        assert_eq!(normalize_extension(".pdf"), ".pdf");
        assert_eq!(normalize_extension(" .Asc-MA1 "), ".asc-ma1");
    }

    #[test]
    fn test_naming_strategy_local_name() {
        assert_eq!(NamingStrategy::Raw.local_name("Sheet A.PDF"), "Sheet A.PDF");
        assert_eq!(
            NamingStrategy::sanitized().local_name("Sheet A/B (1).PDF"),
            "sheet_a_b_1.pdf"
        );
    }
}
