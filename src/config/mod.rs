//! Scraper configuration and constants.
//!
//! This module provides:
//! - Configuration constants (user-agent pool, timeouts, cookie attribute names)
//! - Library options used to construct a session
//! - Log level and format types shared by the library and the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    BodyDecoder, DiagnosticSink, LogFilter, LogFormat, LogLevel, PersistPolicy, ScraperOptions,
};
