//! Command-line interface parsing for Veloboard
//!
//! Handles the backend URL, an optional startup search, and the log file
//! location, using clap.

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::data::DEFAULT_API_URL;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The API URL does not use http or https
    #[error("Invalid API URL '{0}': scheme must be http or https")]
    UnsupportedScheme(String),

    /// The API URL cannot have path segments appended
    #[error("Invalid API URL '{0}': cannot be used as a base URL")]
    NotABase(String),
}

/// Veloboard - Vélib' station availability in your terminal
#[derive(Parser, Debug)]
#[command(name = "veloboard")]
#[command(about = "Browse bike-share station availability from a station backend")]
#[command(version)]
pub struct Cli {
    /// Base URL of the station backend
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Start with a search instead of the full station list
    ///
    /// Examples:
    ///   veloboard --search bastille
    ///   veloboard --search "gare de lyon"
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Write logs to this file instead of the default cache location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Backend base URL
    pub api_url: Url,
    /// Search to run at startup (blank input is dropped)
    pub initial_query: Option<String>,
    /// Explicit log file location
    pub log_file: Option<PathBuf>,
}

/// Checks that a URL is usable as the backend base.
///
/// # Returns
/// * `Ok(())` for http(s) URLs that can carry path segments
/// * `Err(CliError)` otherwise
pub fn validate_api_url(url: &Url) -> Result<(), CliError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CliError::UnsupportedScheme(url.to_string()));
    }
    if url.cannot_be_a_base() {
        return Err(CliError::NotABase(url.to_string()));
    }
    Ok(())
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if the API URL is unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        validate_api_url(&cli.api_url)?;

        let initial_query = cli
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Ok(StartupConfig {
            api_url: cli.api_url.clone(),
            initial_query,
            log_file: cli.log_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_uses_default_url() {
        let cli = Cli::parse_from(["veloboard"]);
        assert_eq!(cli.api_url.as_str(), DEFAULT_API_URL);
        assert!(cli.search.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_cli_parse_custom_url() {
        let cli = Cli::parse_from(["veloboard", "--api-url", "https://velib.example.org/api"]);
        assert_eq!(cli.api_url.host_str(), Some("velib.example.org"));
    }

    #[test]
    fn test_cli_rejects_unparseable_url() {
        let result = Cli::try_parse_from(["veloboard", "--api-url", "not a url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_search_and_log_file() {
        let cli = Cli::parse_from([
            "veloboard",
            "--search",
            "bastille",
            "--log-file",
            "/tmp/veloboard.log",
        ]);
        assert_eq!(cli.search.as_deref(), Some("bastille"));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/veloboard.log")));
    }

    #[test]
    fn test_startup_config_from_cli_defaults() {
        let cli = Cli::parse_from(["veloboard"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert!(config.initial_query.is_none());
    }

    #[test]
    fn test_startup_config_trims_search() {
        let cli = Cli::parse_from(["veloboard", "--search", "  opera  "]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_query.as_deref(), Some("opera"));
    }

    #[test]
    fn test_startup_config_drops_blank_search() {
        let cli = Cli::parse_from(["veloboard", "--search", "   "]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert!(config.initial_query.is_none());
    }

    #[test]
    fn test_startup_config_rejects_non_http_scheme() {
        let cli = Cli::parse_from(["veloboard", "--api-url", "ftp://example.com/api"]);
        let err = StartupConfig::from_cli(&cli).unwrap_err();
        assert!(matches!(err, CliError::UnsupportedScheme(_)));
        assert!(err.to_string().contains("Invalid API URL"));
    }

    #[test]
    fn test_validate_accepts_https() {
        let url = Url::parse("https://example.com/api").unwrap();
        assert!(validate_api_url(&url).is_ok());
    }

    #[test]
    fn test_validate_rejects_data_url() {
        let url = Url::parse("data:text/plain,hello").unwrap();
        assert!(validate_api_url(&url).is_err());
    }
}
