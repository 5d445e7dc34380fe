use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::HIGH_SCORE_KEY;
use crate::error::SnakeError;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// On-disk layout: one flat JSON object of integer values.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(flatten)]
    entries: BTreeMap<String, u32>,
}

/// Integer key/value storage that outlives a single run.
pub trait ScoreStore {
    /// Returns the stored value, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<u32>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: u32) -> Result<(), SnakeError>;
}

/// Reads the best score, defaulting to 0.
pub fn load_high_score(store: &dyn ScoreStore) -> u32 {
    store.get(HIGH_SCORE_KEY).unwrap_or(0)
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Score store backed by a JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, u32>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that cannot be read or
    /// parsed is logged and also treated as empty; it is overwritten on
    /// the next write.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(error) => {
                warn!("ignoring stored scores: {error}");
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.entries.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), SnakeError> {
        self.entries.insert(key.to_owned(), value);
        write_entries(&self.path, &self.entries)
    }
}

/// Volatile store, for tests and runs without a writable data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, u32>,
    pub writes: usize,
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.entries.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), SnakeError> {
        self.entries.insert(key.to_owned(), value);
        self.writes += 1;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, u32>, SnakeError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(SnakeError::ScoreRead {
                path: path.to_owned(),
                source,
            });
        }
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.entries)
        .map_err(|source| SnakeError::ScoreFormat {
            path: path.to_owned(),
            source,
        })
}

fn write_entries(path: &Path, entries: &BTreeMap<String, u32>) -> Result<(), SnakeError> {
    let write_error = |source| SnakeError::ScoreWrite {
        path: path.to_owned(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let payload = ScoreFile {
        entries: entries.clone(),
    };
    let json = serde_json::to_string_pretty(&payload).map_err(|source| SnakeError::ScoreFormat {
        path: path.to_owned(),
        source,
    })?;

    fs::write(path, json).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::config::HIGH_SCORE_KEY;

    use super::{JsonFileStore, MemoryStore, ScoreStore, load_high_score};

    #[test]
    fn stored_score_survives_reopen() {
        let path = unique_test_path("round_trip");

        let mut store = JsonFileStore::open(&path);
        store.set(HIGH_SCORE_KEY, 42).expect("score save should succeed");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(load_high_score(&reopened), 42);
        cleanup_test_path(&path);
    }

    #[test]
    fn score_file_uses_named_key() {
        let path = unique_test_path("format");

        let mut store = JsonFileStore::open(&path);
        store.set(HIGH_SCORE_KEY, 120).expect("score save should succeed");

        let raw = fs::read_to_string(&path).expect("score file should exist");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value["highScore"], 120);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_reads_as_zero() {
        let path = unique_test_path("missing");

        let store = JsonFileStore::open(&path);

        assert_eq!(store.get(HIGH_SCORE_KEY), None);
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn malformed_score_file_reads_as_zero() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        let store = JsonFileStore::open(&path);

        assert_eq!(load_high_score(&store), 0);
        cleanup_test_path(&path);
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::default();

        store.set(HIGH_SCORE_KEY, 10).expect("memory store never fails");
        store.set(HIGH_SCORE_KEY, 20).expect("memory store never fails");

        assert_eq!(store.get(HIGH_SCORE_KEY), Some(20));
        assert_eq!(store.writes, 2);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-score-tests")
            .join(format!("{label}-{nanos}"))
            .join("scores.json")
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
