//! Logging setup for edge-sqlite.
//!
//! Library code logs through the [`log`] facade. Binaries call
//! [`init_logger`] once to install an `env_logger` backend writing to
//! stderr.

use std::env;
use std::fmt;

use log::LevelFilter;

/// Environment variable selecting the log level when no CLI flag does.
pub const LOG_MODE_ENV: &str = "EDGE_SQLITE_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use edge_sqlite::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Errors only.
    Quiet,
    /// Errors, warnings and lifecycle events.
    Normal,
    /// Everything, including per-message tracing.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use edge_sqlite::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` filter this level maps to.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Error,
            Self::Normal => LevelFilter::Info,
            Self::Verbose => LevelFilter::Debug,
        }
    }

    /// Resolve the level from CLI flags and the environment.
    ///
    /// The priority order is:
    /// 1. CLI flags (`verbose` wins over `quiet`)
    /// 2. `EDGE_SQLITE_LOG_MODE` environment variable
    /// 3. Default (Normal)
    #[must_use]
    pub fn resolve(verbose: bool, quiet: bool) -> Self {
        if verbose {
            return Self::Verbose;
        }
        if quiet {
            return Self::Quiet;
        }

        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|value| Self::parse(&value).ok())
            .unwrap_or(Self::Normal)
    }
}

/// Installs the stderr logger and returns the level in effect.
///
/// When `RUST_LOG` is set it takes over filtering entirely. Calling this
/// more than once keeps the first installed backend.
///
/// # Examples
///
/// ```
/// use edge_sqlite::{init_logger, LogLevel};
///
/// let level = init_logger(true, false);
/// assert_eq!(level, LogLevel::Verbose);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> LogLevel {
    let level = LogLevel::resolve(verbose, quiet);

    let mut builder = if env::var_os("RUST_LOG").is_some() {
        env_logger::Builder::from_env(env_logger::Env::default())
    } else {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level.filter());
        builder
    };

    if builder.target(env_logger::Target::Stderr).try_init().is_err() {
        log::debug!("Logger already installed");
    }

    level
}
