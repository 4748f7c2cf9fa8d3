//! Command-line front end helpers.
//!
//! This module provides URL validation used by the binary before handing
//! URLs to a session.

pub mod url;

// Re-export public API
pub use url::validate_and_normalize_url;
