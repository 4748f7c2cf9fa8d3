//! Utility functions.
//!
//! This module provides CSS selector parsing helpers used by document queries.

mod selector;

pub use selector::{parse_query_selector, parse_static_selector};
