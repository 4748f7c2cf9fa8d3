//! Process and session resource initialization.
//!
//! This module provides:
//! - HTTP client construction for the network transport
//! - Process-wide logger setup

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
