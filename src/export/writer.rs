//! Exchange record output directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use tokio::io::AsyncWriteExt;

use super::record::ExchangeRecord;
use crate::config::RECORD_EXTENSION;
use crate::error_handling::{InitializationError, PersistenceError};

/// Writes one JSON file per exchange, named by millisecond timestamp.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    dir: PathBuf,
}

impl RecordWriter {
    /// Opens `dir` for writing, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::OutputDirectoryError` if the directory
    /// cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, InitializationError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| {
            InitializationError::OutputDirectoryError {
                path: dir.display().to_string(),
                source,
            }
        })?;
        Ok(Self { dir })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `record` as `<millis>.json`.
    ///
    /// The record is first written in full to a hidden `.tmp` file and then
    /// linked under its final name, so a failed write never leaves a partial
    /// `.json` file behind. Two records within the same millisecond never
    /// overwrite each other: the later one gets a `-<n>` suffix.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub async fn write(&self, record: &ExchangeRecord) -> Result<PathBuf, PersistenceError> {
        let json = serde_json::to_vec(record)?;
        let millis = chrono::Utc::now().timestamp_millis();

        let temp = self
            .dir
            .join(format!(".{millis}-{:08x}.tmp", rand::random::<u32>()));
        if let Err(e) = write_fully(&temp, &json).await {
            discard(&temp).await;
            return Err(e.into());
        }

        let mut attempt: u32 = 0;
        let linked = loop {
            let name = if attempt == 0 {
                format!("{millis}.{RECORD_EXTENSION}")
            } else {
                format!("{millis}-{attempt}.{RECORD_EXTENSION}")
            };
            let path = self.dir.join(name);

            // hard_link fails instead of replacing an existing file
            match tokio::fs::hard_link(&temp, &path).await {
                Ok(()) => break Ok(path),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => break Err(e),
            }
        };

        discard(&temp).await;
        linked.map_err(PersistenceError::from)
    }
}

async fn write_fully(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await
}

async fn discard(temp: &Path) {
    if let Err(e) = tokio::fs::remove_file(temp).await {
        if e.kind() != ErrorKind::NotFound {
            debug!("Could not remove temporary record {}: {e}", temp.display());
        }
    }
}

/// Ordering key of a record file name: `(millis, suffix)`.
///
/// Names that do not follow the `<millis>[-<n>]` pattern sort last.
pub(crate) fn record_order(path: &Path) -> (i64, u32) {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let (millis, suffix) = stem.split_once('-').unwrap_or((stem, "0"));
    match (millis.parse(), suffix.parse()) {
        (Ok(millis), Ok(suffix)) => (millis, suffix),
        _ => (i64::MAX, u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::record::{
        RecordedRequest, RecordedRequestHeaders, RecordedResponse, RecordedResponseHeaders,
    };
    use tempfile::TempDir;

    fn record(url: &str) -> ExchangeRecord {
        ExchangeRecord {
            request: RecordedRequest {
                url: url.to_string(),
                method: "GET".to_string(),
                headers: RecordedRequestHeaders::default(),
            },
            response: RecordedResponse {
                status: 200,
                headers: RecordedResponseHeaders::default(),
                body: String::new(),
            },
        }
    }

    #[test]
    fn test_create_makes_nested_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a").join("b");
        let writer = RecordWriter::create(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(writer.dir(), dir.as_path());
    }

    #[test]
    fn test_create_fails_on_file_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("occupied");
        std::fs::write(&file, "x").unwrap();
        let result = RecordWriter::create(&file);
        assert!(matches!(
            result,
            Err(InitializationError::OutputDirectoryError { .. })
        ));
    }

    #[tokio::test]
    async fn test_same_millisecond_writes_do_not_collide() {
        let temp = TempDir::new().unwrap();
        let writer = RecordWriter::create(temp.path()).unwrap();

        let mut paths = Vec::new();
        for i in 0..5 {
            paths.push(writer.write(&record(&format!("http://a.test/{i}"))).await.unwrap());
        }
        let names: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 5);
        assert!(names.iter().all(|n| n.ends_with(".json") && !n.starts_with('.')));

        let written: ExchangeRecord =
            serde_json::from_slice(&std::fs::read(&paths[4]).unwrap()).unwrap();
        assert_eq!(written.request.url, "http://a.test/4");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_record_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("records");
        let writer = RecordWriter::create(&dir).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(
            writer.write(&record("http://a.test/")).await,
            Err(PersistenceError::Io(_))
        ));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_write_fully_creates_new_file_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".x.tmp");
        write_fully(&path, b"{}").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");

        let again = write_fully(&path, b"[]").await;
        assert_eq!(again.unwrap_err().kind(), ErrorKind::AlreadyExists);
        discard(&path).await;
        assert!(!path.exists());
        // Discarding twice is harmless
        discard(&path).await;
    }

    #[test]
    fn test_record_order() {
        assert_eq!(record_order(Path::new("/x/1700000000000.json")), (1700000000000, 0));
        assert_eq!(record_order(Path::new("1700000000000-2.json")), (1700000000000, 2));
        assert!(record_order(Path::new("1700000000000-2.json")) > record_order(Path::new("1700000000000.json")));
        assert_eq!(record_order(Path::new("notes.json")), (i64::MAX, u32::MAX));
    }
}
