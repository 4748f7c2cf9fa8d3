//! Error handling.
//!
//! This module provides:
//! - Error type definitions for initialization, transport, and persistence
//! - Categorization of transport failures for diagnostics
//!
//! No error is retried anywhere in the library; retry policy belongs to callers.

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    InitializationError, PersistenceError, ScraperError, TransportError, TransportErrorKind,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_transport_error_kinds_have_distinct_names() {
        let names: std::collections::HashSet<String> =
            TransportErrorKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(names.len(), TransportErrorKind::iter().count());
    }

    #[test]
    fn test_scraper_error_is_transparent() {
        let error: ScraperError = TransportError::FixtureNotFound {
            method: "GET".to_string(),
            url: "http://www.example.com/".to_string(),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "No fixture recorded for GET http://www.example.com/"
        );

        let error: ScraperError = PersistenceError::Store("disk full".to_string()).into();
        assert_eq!(error.to_string(), "Cache store error: disk full");
    }

    #[test]
    fn test_output_directory_error_message() {
        let error = InitializationError::OutputDirectoryError {
            path: "/nope".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(error.to_string().contains("/nope"));
    }
}
