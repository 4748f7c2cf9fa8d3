//! Error type definitions.
//!
//! This module defines all error types used throughout the library.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error creating the exchange record output directory.
    #[error("Output directory error for {path}: {source}")]
    OutputDirectoryError {
        /// Directory that could not be created
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Error loading fixture records from the input directory.
    #[error("Fixture loading error: {0}")]
    FixtureError(String),
}

/// Failure to obtain a status and body for a request.
///
/// Never retried by the library; surfaced to the caller as-is.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP client failed (connection refused, DNS failure, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// No recorded exchange matches the request.
    #[error("No fixture recorded for {method} {url}")]
    FixtureNotFound {
        /// Request method
        method: String,
        /// Request URL
        url: String,
    },

    /// A recorded exchange could not be turned into a response.
    #[error("Invalid fixture: {0}")]
    Fixture(String),
}

/// Failure writing an exchange record or a cache entry.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failure reported by a cache collaborator.
    #[error("Cache store error: {0}")]
    Store(String),
}

/// The error of every public fetch operation.
///
/// Each call resolves to exactly one `FetchResult` or exactly one of these.
#[derive(Error, Debug)]
pub enum ScraperError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Persisting the exchange failed under `PersistPolicy::FailStrict`.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<ReqwestError> for ScraperError {
    fn from(error: ReqwestError) -> Self {
        ScraperError::Transport(TransportError::Http(error))
    }
}

/// Categories of transport failures, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIterMacro)]
pub enum TransportErrorKind {
    /// The request could not be built (invalid URL, invalid header value)
    Builder,
    /// Redirect policy violation
    Redirect,
    /// Timed out
    Timeout,
    /// Connection refused, DNS failure, TLS failure
    Connect,
    /// Other request-level failure
    Request,
    /// Failure while reading the body
    Body,
    /// Failure while decoding the body
    Decode,
    /// Fixture replay failure
    Fixture,
    /// Anything else
    Other,
}
