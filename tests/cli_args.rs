//! Integration tests for CLI argument handling
//!
//! Covers the --api-url validation and --search parsing from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_veloboard"))
        .args(args)
        .output()
        .expect("Failed to execute veloboard")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("veloboard"), "Help should mention veloboard");
    assert!(stdout.contains("api-url"), "Help should mention --api-url");
    assert!(stdout.contains("search"), "Help should mention --search");
}

#[test]
fn test_unparseable_api_url_prints_error_and_exits() {
    let output = run_cli(&["--api-url", "not a url"]);
    assert!(!output.status.success(), "Expected invalid URL to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid") || stderr.contains("Invalid"),
        "Should print error message about the URL: {}",
        stderr
    );
}

#[test]
fn test_non_http_api_url_exits_before_starting_ui() {
    let output = run_cli(&["--api-url", "ftp://example.com/api"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid API URL"),
        "Should explain the scheme problem: {}",
        stderr
    );
}

#[test]
fn test_search_with_help_is_valid() {
    // --help short-circuits before the TUI starts
    let output = run_cli(&["--search", "bastille", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use veloboard::cli::{Cli, StartupConfig};
    use veloboard::data::DEFAULT_API_URL;

    #[test]
    fn test_cli_no_args_uses_default_backend() {
        let cli = Cli::parse_from(["veloboard"]);
        assert_eq!(cli.api_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_startup_config_keeps_search() {
        let cli = Cli::parse_from(["veloboard", "--search", "gare de lyon"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_query.as_deref(), Some("gare de lyon"));
    }

    #[test]
    fn test_startup_config_custom_backend() {
        let cli = Cli::parse_from(["veloboard", "--api-url", "https://velib.example.org/v2/"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.api_url.path(), "/v2/");
    }
}
