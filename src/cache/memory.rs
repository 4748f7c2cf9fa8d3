//! In-process cache store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{CacheEntry, CacheLookup, CacheStore};
use crate::error_handling::PersistenceError;
use crate::fetch::ResponseMeta;

/// Cache store kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored URLs.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCache {
    fn query(&self, url: &str) -> Result<CacheLookup, PersistenceError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries
            .get(url)
            .cloned()
            .map_or(CacheLookup::Miss, CacheLookup::Hit))
    }

    fn persist(
        &self,
        url: &str,
        response: &ResponseMeta,
        body: &str,
    ) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                url.to_string(),
                CacheEntry {
                    response: response.clone(),
                    body: body.to_string(),
                },
            );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};

    #[test]
    fn test_query_unknown_url_is_miss() {
        let cache = MemoryCache::new();
        assert_eq!(cache.query("http://a.test/").unwrap(), CacheLookup::Miss);
    }

    #[test]
    fn test_persist_then_query_and_overwrite() {
        let cache = MemoryCache::new();
        let mut headers = HeaderMap::new();
        headers.insert(SET_COOKIE, HeaderValue::from_static("a=1"));
        let meta = ResponseMeta {
            status: 201,
            headers,
        };

        cache.persist("http://a.test/", &meta, "first").unwrap();
        cache.persist("http://a.test/", &meta, "second").unwrap();

        match cache.query("http://a.test/").unwrap() {
            CacheLookup::Hit(entry) => {
                assert_eq!(entry.body, "second");
                assert_eq!(entry.response, meta);
            }
            CacheLookup::Miss => panic!("expected a hit"),
        }
        assert_eq!(cache.len(), 1);
    }
}
