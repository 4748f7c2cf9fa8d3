//! Logger initialization.
//!
//! This module configures the process-wide `env_logger` backend for the `log`
//! facade used throughout the library.

use std::io::{self, Write};

use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies whose logs are capped regardless of the requested level.
const CAPPED_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and `level` then overrides it, so per-module
/// directives still apply to modules outside this crate. HTML parsing and HTTP
/// stack crates are capped so that per-request debugging stays readable.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=reqwest=debug session_scraper --log-level debug http://www.example.com/
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for (module, cap) in CAPPED_MODULES {
        builder.filter_module(module, level.min(*cap));
    }
    builder.filter_module("session_scraper", level);

    match format {
        LogFormat::Json => builder.format(format_json),
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(format_plain)
        }
    };

    builder.try_init()?;
    Ok(())
}

/// One JSON object per line: `{"ts":<millis>,"level":..,"target":..,"msg":..}`.
fn format_json(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let line = serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{line}")
}

fn format_plain(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let level = record.level().as_str();
    let level = match record.level() {
        Level::Error => level.red(),
        Level::Warn => level.yellow(),
        Level::Info => level.green(),
        Level::Debug => level.blue(),
        Level::Trace => level.purple(),
    };
    writeln!(
        buf,
        "{} {} [{}] {}",
        chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
        record.target().cyan(),
        level,
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_initialization_is_an_error_not_a_panic() {
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
