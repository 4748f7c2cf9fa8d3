//! Response cache for GET requests.
//!
//! `CachedFetcher` wraps any `Fetcher` and consults a `CacheStore` before going
//! to the network:
//!
//! ```text
//! GET + store ──▶ query ──▶ Hit  ──▶ result from stored body (session untouched)
//!                      └──▶ Miss ──▶ inner fetch ──▶ persist ──▶ result
//! POST or no store ──────────────▶ inner fetch ──────────────▶ result
//! ```
//!
//! A store answers each lookup with exactly one definitive outcome, so a call
//! either resolves from the cache or proceeds to the network, never both.

mod decorator;
mod directory;
mod memory;

use crate::error_handling::PersistenceError;
use crate::fetch::ResponseMeta;

pub use decorator::CachedFetcher;
pub use directory::DirectoryCache;
pub use memory::MemoryCache;

/// A stored response: enough to rebuild a `FetchResult` without a network call.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Status and headers of the stored response
    pub response: ResponseMeta,
    /// Decoded body of the stored response
    pub body: String,
}

/// Outcome of one cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// A previously stored response
    Hit(CacheEntry),
    /// Nothing stored for the URL
    Miss,
}

/// Storage collaborator of `CachedFetcher`, keyed by request URL.
pub trait CacheStore: Send + Sync {
    /// Looks up the response stored for `url`.
    ///
    /// An error is treated by the caller like a miss.
    fn query(&self, url: &str) -> Result<CacheLookup, PersistenceError>;

    /// Stores the response fetched for `url`, replacing any previous entry.
    fn persist(&self, url: &str, response: &ResponseMeta, body: &str)
        -> Result<(), PersistenceError>;
}
