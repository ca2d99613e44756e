//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Download the files linked from a web directory listing.
///
/// Fetches one listing page, keeps the links that look like files with an
/// allowed extension, and saves each one into the output directory.
/// Files already present are skipped, so runs can be repeated safely.
#[derive(Parser, Debug, Clone)]
#[command(name = "dirgrab")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/dirgrab/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Listing page URL; file URLs are this value with the link appended
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory to save files into
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Normalize local file names and force an extension onto them
    #[arg(short, long)]
    pub sanitize: bool,

    /// Extension forced by --sanitize
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Allowed extension (repeatable; replaces the default list)
    #[arg(long = "allow-ext", value_name = "EXT")]
    pub allow_ext: Vec<String>,

    /// Also drop links starting with '?' (listing sort links)
    #[arg(long)]
    pub skip_query_links: bool,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// Whole-request timeout in seconds (1-3600)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["dirgrab"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(!args.sanitize);
        assert!(args.base_url.is_none());
        assert!(args.output_dir.is_none());
        assert!(args.allow_ext.is_empty());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["dirgrab", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["dirgrab", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["dirgrab", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_allow_ext_is_repeatable() {
        let args =
            Args::try_parse_from(["dirgrab", "--allow-ext", "pdf", "--allow-ext", ".zip"]).unwrap();
        assert_eq!(args.allow_ext, vec!["pdf", ".zip"]);
    }

    #[test]
    fn test_cli_sanitize_with_extension() {
        let args = Args::try_parse_from(["dirgrab", "-s", "--extension", ".doc"]).unwrap();
        assert!(args.sanitize);
        assert_eq!(args.extension.as_deref(), Some(".doc"));
    }

    #[test]
    fn test_cli_timeout_zero_rejected() {
        let err = Args::try_parse_from(["dirgrab", "--timeout", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_connect_timeout_max_value() {
        let args = Args::try_parse_from(["dirgrab", "--connect-timeout", "3600"]).unwrap();
        assert_eq!(args.connect_timeout, Some(3600));
    }

    #[test]
    fn test_cli_output_dir_short_flag() {
        let args = Args::try_parse_from(["dirgrab", "-o", "out"]).unwrap();
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }
}
