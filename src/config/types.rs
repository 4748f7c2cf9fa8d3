//! Configuration types.
//!
//! This module defines the options used to construct a session, plus the enums
//! shared with the command-line front end.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use strum_macros::{Display, EnumString};

use crate::config::constants::DEFAULT_TIMEOUT_SECS;

/// Sink for per-session diagnostic messages.
pub type DiagnosticSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Converts raw response bytes into the body string handed to the caller.
pub type BodyDecoder = Arc<dyn Fn(&[u8]) -> String + Send + Sync>;

/// Diagnostic verbosity of a session.
///
/// `Quiet` keeps per-request diagnostics at debug level in the `log` facade and
/// never calls a configured sink. `Verbose` sends them to the sink (or to
/// `log::info!` when no sink is configured).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, ValueEnum)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LogLevel {
    /// Per-request diagnostics are suppressed
    #[default]
    Quiet,
    /// Per-request diagnostics are emitted
    Verbose,
}

/// Minimum level for the process-wide logger.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFilter {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogFilter> for log::LevelFilter {
    fn from(l: LogFilter) -> Self {
        match l {
            LogFilter::Error => log::LevelFilter::Error,
            LogFilter::Warn => log::LevelFilter::Warn,
            LogFilter::Info => log::LevelFilter::Info,
            LogFilter::Debug => log::LevelFilter::Debug,
            LogFilter::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What happens when writing an exchange record or a cache entry fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PersistPolicy {
    /// Log the failure and still return the fetched result
    #[default]
    FailSafe,
    /// Fail the whole call with a persistence error
    FailStrict,
}

/// Session configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use session_scraper::{LogLevel, ScraperOptions};
///
/// let options = ScraperOptions {
///     user_agent: Some("foobar-agent 1.0".to_string()),
///     log_level: LogLevel::Verbose,
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct ScraperOptions {
    /// Fixed User-Agent; a random entry of `USER_AGENTS` is used when unset
    pub user_agent: Option<String>,

    /// Directory that receives one exchange record per request
    pub output: Option<PathBuf>,

    /// Directory of exchange records replayed instead of the network
    pub input: Option<PathBuf>,

    /// Diagnostic verbosity
    pub log_level: LogLevel,

    /// Diagnostic sink, used when `log_level` is `Verbose`
    pub logger: Option<DiagnosticSink>,

    /// Per-request transport timeout in seconds
    pub timeout_seconds: u64,

    /// Failure policy for exchange records and cache entries
    pub persist_policy: PersistPolicy,

    /// Custom response body decoding (lossy UTF-8 when unset)
    pub body_decoder: Option<BodyDecoder>,
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            output: None,
            input: None,
            log_level: LogLevel::Quiet,
            logger: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            persist_policy: PersistPolicy::FailSafe,
            body_decoder: None,
        }
    }
}

impl fmt::Debug for ScraperOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScraperOptions")
            .field("user_agent", &self.user_agent)
            .field("output", &self.output)
            .field("input", &self.input)
            .field("log_level", &self.log_level)
            .field("logger", &self.logger.as_ref().map(|_| "<fn>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("persist_policy", &self.persist_policy)
            .field("body_decoder", &self.body_decoder.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
