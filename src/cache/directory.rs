//! On-disk cache store.

use std::path::{Path, PathBuf};

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{CacheEntry, CacheLookup, CacheStore};
use crate::config::RECORD_EXTENSION;
use crate::error_handling::PersistenceError;
use crate::fetch::ResponseMeta;

/// Serialized form of a cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    url: String,
    cached_at_ms: i64,
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

/// Cache store keeping one JSON file per URL in a directory.
///
/// Files are named by the 128-bit MurmurHash3 (x64 variant, seed 0) of the
/// URL. The URL is stored inside each file and checked on load, so a hash
/// collision reads as a miss rather than a wrong page.
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    dir: PathBuf,
}

impl DirectoryCache {
    /// Uses `dir` for storage. The directory is created on first persist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let (high, low) = murmurhash3::murmurhash3_x64_128(url.as_bytes(), 0);
        self.dir
            .join(format!("{high:016x}{low:016x}.{RECORD_EXTENSION}"))
    }
}

impl CacheStore for DirectoryCache {
    fn query(&self, url: &str) -> Result<CacheLookup, PersistenceError> {
        let path = self.entry_path(url);
        if !path.exists() {
            return Ok(CacheLookup::Miss);
        }

        let content = std::fs::read(&path)?;
        let stored: StoredEntry = serde_json::from_slice(&content)?;
        if stored.url != url {
            debug!(
                "Cache file {} belongs to {}, not {url}",
                path.display(),
                stored.url
            );
            return Ok(CacheLookup::Miss);
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &stored.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| PersistenceError::Store(format!("{}: {e}", path.display())))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| PersistenceError::Store(format!("{}: {e}", path.display())))?;
            headers.append(name, value);
        }

        Ok(CacheLookup::Hit(CacheEntry {
            response: ResponseMeta {
                status: stored.status,
                headers,
            },
            body: stored.body,
        }))
    }

    fn persist(
        &self,
        url: &str,
        response: &ResponseMeta,
        body: &str,
    ) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)?;

        let mut headers = Vec::with_capacity(response.headers.len());
        for (name, value) in &response.headers {
            match value.to_str() {
                Ok(value) => headers.push((name.as_str().to_string(), value.to_string())),
                Err(e) => debug!("Not caching non-text header {name} for {url}: {e}"),
            }
        }
        let stored = StoredEntry {
            url: url.to_string(),
            cached_at_ms: chrono::Utc::now().timestamp_millis(),
            status: response.status,
            headers,
            body: body.to_string(),
        };

        let content = serde_json::to_vec_pretty(&stored)?;
        std::fs::write(self.entry_path(url), content)?;
        Ok(())
    }
}
