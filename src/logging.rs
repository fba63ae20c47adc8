//! Log file setup
//!
//! The terminal belongs to the UI, so tracing output goes to a file. The level
//! comes from `VELOBOARD_LOG_LEVEL` (an `EnvFilter` directive string) and
//! defaults to `info`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::filter::{Directive, LevelFilter, ParseError};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_LEVEL_ENV: &str = "VELOBOARD_LOG_LEVEL";

/// File name used inside the cache directory
const LOG_FILE_NAME: &str = "veloboard.log";

/// Dependencies that are too chatty below `warn`
const QUIET_TARGETS: [&str; 5] = ["reqwest", "hyper", "hyper_util", "rustls", "tokio"];

/// Errors that can occur while setting up logging
#[derive(Debug, Error)]
pub enum LoggingError {
    /// No home directory to derive the cache location from
    #[error("Could not determine a cache directory for the log file")]
    NoCacheDir,

    /// The log file could not be created
    #[error("Failed to open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A filter directive did not parse
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// A global subscriber is already installed
    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Default log location, e.g. `~/.cache/veloboard/veloboard.log` on Linux
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "veloboard")?;
    Some(project_dirs.cache_dir().join(LOG_FILE_NAME))
}

/// Opens `path` for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let to_error = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}

/// Builds the filter from the environment, capping noisy dependencies
pub fn build_filter() -> Result<EnvFilter, LoggingError> {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(LOG_LEVEL_ENV)
        .from_env_lossy();

    for target in QUIET_TARGETS {
        let directive: Directive = format!("{}=warn", target).parse()?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

/// Installs the global tracing subscriber writing to `path`
/// (or [`default_log_path`] when `None`).
///
/// # Returns
/// The path actually used, so callers can report it.
pub fn init_logging(path: Option<&Path>) -> Result<PathBuf, LoggingError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok_or(LoggingError::NoCacheDir)?,
    };

    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter()?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(path)
}
