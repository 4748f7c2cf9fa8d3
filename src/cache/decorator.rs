//! Caching `Fetcher` decorator.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use super::{CacheLookup, CacheStore};
use crate::config::PersistPolicy;
use crate::error_handling::ScraperError;
use crate::fetch::{FetchResult, Fetcher, Method, Request};

/// Wraps a `Fetcher` so GET requests may be answered from a `CacheStore`.
///
/// Without a store the decorator is transparent. A cache hit rebuilds the
/// document from the stored body and does not touch the inner session:
/// cookies and referer are only updated by real network responses.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use session_scraper::{CachedFetcher, Fetcher, MemoryCache, Scraper};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = CachedFetcher::new(Scraper::new()?).with_store(Arc::new(MemoryCache::new()));
/// let first = fetcher.get("http://www.example.com/x").await?; // network
/// let second = fetcher.get("http://www.example.com/x").await?; // cache
/// assert_eq!(first.body, second.body);
/// # Ok(())
/// # }
/// ```
pub struct CachedFetcher<F> {
    inner: F,
    store: Option<Arc<dyn CacheStore>>,
    persist_policy: PersistPolicy,
}

impl<F: Fetcher> CachedFetcher<F> {
    /// Wraps `inner` with no store attached.
    ///
    /// Cache persist failures follow the persist policy of `inner`.
    pub fn new(inner: F) -> Self {
        let persist_policy = inner.persist_policy();
        Self {
            inner,
            store: None,
            persist_policy,
        }
    }

    /// Attaches `store`.
    pub fn with_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Overrides what happens when persisting a fetched response fails.
    pub fn with_persist_policy(mut self, policy: PersistPolicy) -> Self {
        self.persist_policy = policy;
        self
    }

    /// Attaches or replaces the store after construction.
    pub fn set_store(&mut self, store: Arc<dyn CacheStore>) {
        self.store = Some(store);
    }

    /// The wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Unwraps the decorator.
    pub fn into_inner(self) -> F {
        self.inner
    }

    /// Fetches `url` from the network, skipping both lookup and persist.
    pub async fn force_get(&self, url: &str) -> Result<FetchResult, ScraperError> {
        self.inner.get(url).await
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for CachedFetcher<F> {
    async fn fetch(&self, request: Request) -> Result<FetchResult, ScraperError> {
        let store = match (&self.store, request.method) {
            (Some(store), Method::Get) => Arc::clone(store),
            _ => return self.inner.fetch(request).await,
        };
        let url = request.url.clone();

        match store.query(&url) {
            Ok(CacheLookup::Hit(entry)) => {
                debug!("Cache hit for {url}");
                return Ok(FetchResult::new(entry.response, entry.body));
            }
            Ok(CacheLookup::Miss) => debug!("Cache miss for {url}"),
            Err(e) => warn!("Cache lookup for {url} failed, fetching from network: {e}"),
        }

        let result = self.inner.fetch(request).await?;

        if let Err(e) = store.persist(&url, &result.response, &result.body) {
            match self.persist_policy {
                PersistPolicy::FailStrict => return Err(e.into()),
                PersistPolicy::FailSafe => warn!("Cache entry for {url} not saved: {e}"),
            }
        }

        Ok(result)
    }

    fn persist_policy(&self) -> PersistPolicy {
        self.persist_policy
    }
}
