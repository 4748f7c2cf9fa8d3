//! Response processing results.
//!
//! This module holds the caller-facing result of a fetch and the queryable
//! document built over the response body.

mod document;
mod types;

pub use document::Document;
pub use types::{FetchResult, ResponseMeta};
