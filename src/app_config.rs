//! Config file loading and CLI-over-file-over-default layering.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirgrab_core::config::normalize_extension;
use dirgrab_core::{NamingStrategy, ScrapeConfig};
use serde::Deserialize;

use crate::cli::Args;

/// TOML-backed file configuration. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Listing page URL.
    pub base_url: Option<String>,
    /// Output directory.
    pub output_dir: Option<PathBuf>,
    /// Sanitize local names.
    pub sanitize: Option<bool>,
    /// Extension forced by sanitizing.
    pub forced_extension: Option<String>,
    /// Replacement extension allow-list.
    pub allowed_extensions: Option<Vec<String>>,
    /// Drop `?` links.
    pub skip_query_links: Option<bool>,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// DOM walk depth limit.
    pub max_depth: Option<usize>,
}

/// Result of locating and loading the config file.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Path looked at, if one could be determined.
    pub path: Option<PathBuf>,
    /// Parsed contents when the file exists.
    pub config: Option<FileConfig>,
}

/// Resolves the default config path.
///
/// 1. `$XDG_CONFIG_HOME/dirgrab/config.toml`
/// 2. `$HOME/.config/dirgrab/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join("dirgrab").join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("dirgrab")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config named on the command line, or the default one if present.
///
/// An explicit path must exist; a missing default file means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.is_file() => Some(load_file_config(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    Ok(toml::from_str(raw)?)
}

/// Builds the effective run configuration: defaults, then file, then CLI.
pub fn build_scrape_config(args: &Args, file: Option<&FileConfig>) -> Result<ScrapeConfig> {
    let mut config = ScrapeConfig::default();
    let mut sanitize = false;
    let mut forced_extension: Option<String> = None;

    if let Some(file) = file {
        if let Some(base_url) = &file.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(output_dir) = &file.output_dir {
            config.output_dir.clone_from(output_dir);
        }
        if let Some(value) = file.sanitize {
            sanitize = value;
        }
        if let Some(extension) = &file.forced_extension {
            forced_extension = Some(normalize_extension(extension));
        }
        if let Some(extensions) = &file.allowed_extensions {
            config.allowed_extensions = extensions.iter().map(|e| normalize_extension(e)).collect();
        }
        if let Some(value) = file.skip_query_links {
            config.skip_query_links = value;
        }
        if let Some(value) = file.connect_timeout_secs {
            config.connect_timeout_secs = value;
        }
        if let Some(value) = file.request_timeout_secs {
            config.request_timeout_secs = value;
        }
        if let Some(value) = file.max_depth {
            config.max_depth = value;
        }
    }

    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir.clone_from(output_dir);
    }
    if args.sanitize {
        sanitize = true;
    }
    if let Some(extension) = &args.extension {
        forced_extension = Some(normalize_extension(extension));
    }
    if !args.allow_ext.is_empty() {
        config.allowed_extensions = args.allow_ext.iter().map(|e| normalize_extension(e)).collect();
    }
    if args.skip_query_links {
        config.skip_query_links = true;
    }
    if let Some(value) = args.connect_timeout {
        config.connect_timeout_secs = value;
    }
    if let Some(value) = args.timeout {
        config.request_timeout_secs = value;
    }

    if sanitize {
        config.naming = match forced_extension {
            Some(extension) => NamingStrategy::Sanitized { extension },
            None => NamingStrategy::sanitized(),
        };
    }

    config
        .validate()
        .context("Invalid effective configuration")?;
    Ok(config)
}
