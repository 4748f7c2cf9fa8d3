//! Fixture replay transport.
//!
//! Answers requests from a directory of exchange records instead of the
//! network, so a captured session can be replayed offline.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use log::{debug, info};

use super::record::ExchangeRecord;
use super::writer::record_order;
use crate::config::RECORD_EXTENSION;
use crate::error_handling::{InitializationError, TransportError};
use crate::fetch::{RawResponse, RequestDescriptor, Transport};

type ExchangeKey = (String, String);

/// Transport replaying recorded exchanges keyed by method and URL.
///
/// Responses for the same key are served in recording order; once only one
/// remains it is served for every further request.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    exchanges: Mutex<HashMap<ExchangeKey, VecDeque<ExchangeRecord>>>,
}

impl FixtureTransport {
    /// Builds a transport from records, in the order given.
    pub fn from_records(records: impl IntoIterator<Item = ExchangeRecord>) -> Self {
        let mut exchanges: HashMap<ExchangeKey, VecDeque<ExchangeRecord>> = HashMap::new();
        for record in records {
            let key = (record.request.method.clone(), record.request.url.clone());
            exchanges.entry(key).or_default().push_back(record);
        }
        Self {
            exchanges: Mutex::new(exchanges),
        }
    }

    /// Loads every `*.json` exchange record in `dir`, in timestamp order.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::FixtureError` if the directory cannot be
    /// read or a record file is not a valid exchange record.
    pub fn load(dir: &Path) -> Result<Self, InitializationError> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            InitializationError::FixtureError(format!("{}: {e}", dir.display()))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION)
            })
            .collect();
        paths.sort_by(|a, b| record_order(a).cmp(&record_order(b)).then_with(|| a.cmp(b)));

        let mut records = Vec::with_capacity(paths.len());
        for path in &paths {
            let content = std::fs::read(path).map_err(|e| {
                InitializationError::FixtureError(format!("{}: {e}", path.display()))
            })?;
            let record: ExchangeRecord = serde_json::from_slice(&content).map_err(|e| {
                InitializationError::FixtureError(format!("{}: {e}", path.display()))
            })?;
            records.push(record);
        }

        info!(
            "Loaded {} fixture record(s) from {}",
            records.len(),
            dir.display()
        );
        Ok(Self::from_records(records))
    }

    /// Number of distinct `(method, url)` pairs that can be answered.
    pub fn len(&self) -> usize {
        self.exchanges
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no request can be answered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_record(&self, method: &str, url: &str) -> Option<ExchangeRecord> {
        let mut exchanges = self
            .exchanges
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let queue = exchanges.get_mut(&(method.to_string(), url.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let method = request.method.to_string();
        let record = self.next_record(&method, &request.url).ok_or_else(|| {
            TransportError::FixtureNotFound {
                method: method.clone(),
                url: request.url.clone(),
            }
        })?;
        debug!("Replaying fixture for {method} {}", request.url);
        record.to_raw_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::record::{
        RecordedRequest, RecordedRequestHeaders, RecordedResponse, RecordedResponseHeaders,
    };
    use crate::fetch::{Method, RequestHeaders};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use tempfile::TempDir;

    fn record(method: &str, url: &str, body: &str) -> ExchangeRecord {
        ExchangeRecord {
            request: RecordedRequest {
                url: url.to_string(),
                method: method.to_string(),
                headers: RecordedRequestHeaders::default(),
            },
            response: RecordedResponse {
                status: 200,
                headers: RecordedResponseHeaders::default(),
                body: STANDARD.encode(body),
            },
        }
    }

    fn descriptor(method: Method, url: &str) -> RequestDescriptor {
        RequestDescriptor {
            url: url.to_string(),
            method,
            form: None,
            headers: RequestHeaders {
                user_agent: "agent/1.0".to_string(),
                cookie: None,
                referer: None,
            },
        }
    }

    #[tokio::test]
    async fn test_replays_in_order_then_repeats_last() {
        let transport = FixtureTransport::from_records([
            record("GET", "http://a.test/", "first"),
            record("GET", "http://a.test/", "second"),
        ]);
        let request = descriptor(Method::Get, "http://a.test/");

        let bodies: Vec<Vec<u8>> = vec![
            transport.execute(&request).await.unwrap().body,
            transport.execute(&request).await.unwrap().body,
            transport.execute(&request).await.unwrap().body,
        ];
        assert_eq!(bodies, vec![b"first".to_vec(), b"second".to_vec(), b"second".to_vec()]);
    }

    #[tokio::test]
    async fn test_method_is_part_of_the_key() {
        let transport = FixtureTransport::from_records([record("POST", "http://a.test/", "posted")]);
        let result = transport
            .execute(&descriptor(Method::Get, "http://a.test/"))
            .await;
        assert!(matches!(
            result,
            Err(TransportError::FixtureNotFound { .. })
        ));
        let posted = transport
            .execute(&descriptor(Method::Post, "http://a.test/"))
            .await
            .unwrap();
        assert_eq!(posted.body, b"posted");
    }

    #[tokio::test]
    async fn test_load_sorts_by_timestamp_and_skips_other_files() {
        let temp = TempDir::new().unwrap();
        let write = |name: &str, rec: &ExchangeRecord| {
            std::fs::write(temp.path().join(name), serde_json::to_vec(rec).unwrap()).unwrap();
        };
        write("1700000000002.json", &record("GET", "http://a.test/", "third"));
        write("1700000000000-1.json", &record("GET", "http://a.test/", "second"));
        write("1700000000000.json", &record("GET", "http://a.test/", "first"));
        std::fs::write(temp.path().join("README.txt"), "not a record").unwrap();

        let transport = FixtureTransport::load(temp.path()).unwrap();
        assert_eq!(transport.len(), 1);

        let request = descriptor(Method::Get, "http://a.test/");
        for expected in ["first", "second", "third"] {
            let body = transport.execute(&request).await.unwrap().body;
            assert_eq!(body, expected.as_bytes());
        }
    }

    #[tokio::test]
    async fn test_load_ignores_interrupted_writes() {
        let temp = TempDir::new().unwrap();
        let writer = crate::export::RecordWriter::create(temp.path()).unwrap();
        writer
            .write(&record("GET", "http://a.test/", "complete"))
            .await
            .unwrap();
        // What an interrupted write leaves behind
        std::fs::write(temp.path().join(".1700000000000-0badf00d.tmp"), "{\"req").unwrap();

        let transport = FixtureTransport::load(temp.path()).unwrap();
        let body = transport
            .execute(&descriptor(Method::Get, "http://a.test/"))
            .await
            .unwrap()
            .body;
        assert_eq!(body, b"complete");
    }

    #[test]
    fn test_load_rejects_invalid_records() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("1.json"), "{not json").unwrap();
        assert!(matches!(
            FixtureTransport::load(temp.path()),
            Err(InitializationError::FixtureError(_))
        ));
    }

    #[test]
    fn test_load_missing_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        assert!(FixtureTransport::load(&missing).is_err());
        assert!(FixtureTransport::default().is_empty());
    }
}
