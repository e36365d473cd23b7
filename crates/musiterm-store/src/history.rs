//! Append-only test history ledger.
//!
//! Records are kept in insertion order (oldest first) and every mutation
//! rewrites the whole file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use musiterm_core::{StateCodec, TestRecord};

use crate::codec::StateFile;
use crate::error::StoreError;

pub struct HistoryLedger {
    file: StateFile,
    records: Vec<TestRecord>,
}

impl HistoryLedger {
    /// Open the ledger at `path`, loading whatever it currently holds.
    ///
    /// A missing, blank, or unreadable file opens as an empty ledger.
    pub fn open(path: impl Into<PathBuf>, codec: Arc<dyn StateCodec>) -> Self {
        let file = StateFile::new(path, codec);
        let records = match Self::read_records(&file) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("{e}; starting with an empty history");
                Vec::new()
            }
        };
        tracing::debug!(path = %file.path().display(), records = records.len(), "history loaded");
        Self { file, records }
    }

    fn read_records(file: &StateFile) -> Result<Vec<TestRecord>, StoreError> {
        let Some(bytes) = file.read()? else {
            return Ok(Vec::new());
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: file.path().to_path_buf(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append `record` and persist.
    ///
    /// The record stays in memory even if the write fails.
    pub fn append(&mut self, record: TestRecord) -> Result<(), StoreError> {
        self.records.push(record);
        self.flush()
    }

    /// Drop every record and persist the empty ledger.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        self.flush()
    }

    /// Write the in-memory records to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        let json =
            serde_json::to_vec_pretty(&self.records).map_err(|source| StoreError::Malformed {
                path: self.file.path().to_path_buf(),
                source,
            })?;
        self.file.write(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::PlainCodec;
    use chrono::NaiveDate;

    fn record(minute: u32, label: &str, correct: usize, total: usize) -> TestRecord {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, minute, 0)
            .unwrap();
        TestRecord::new(at, label, correct, total)
    }

    fn open(dir: &tempfile::TempDir) -> HistoryLedger {
        HistoryLedger::open(dir.path().join("test_history.enc"), Arc::new(PlainCodec))
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = open(&dir);
        assert!(ledger.is_empty());
        assert!(!ledger.path().exists());
    }

    #[test]
    fn append_persists_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = open(&dir);
        ledger.append(record(0, "Tempo", 3, 5)).unwrap();
        ledger.append(record(5, "Complete Test", 10, 10)).unwrap();

        let reopened = open(&dir);
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.records()[0].test_type, "Tempo");
        assert_eq!(reopened.records()[0].percentage, "60.0%");
        assert_eq!(reopened.records()[1].date, "2024-03-09 14:05");
        assert_eq!(reopened.records(), ledger.records());
    }

    #[test]
    fn clear_persists_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = open(&dir);
        ledger.append(record(0, "Signs", 1, 2)).unwrap();
        ledger.clear().unwrap();
        assert!(ledger.is_empty());

        let raw = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(raw.trim(), "[]");
        assert!(open(&dir).is_empty());
    }

    #[test]
    fn unreadable_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_history.enc");

        for content in ["", "   \n", "{\"not\": \"a list\"}", "garbage"] {
            std::fs::write(&path, content).unwrap();
            assert!(open(&dir).is_empty(), "{content:?}");
        }
    }

    #[test]
    fn append_after_corruption_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test_history.enc"), "garbage").unwrap();

        let mut ledger = open(&dir);
        ledger.append(record(1, "Dynamics", 2, 4)).unwrap();
        assert_eq!(open(&dir).records(), &[record(1, "Dynamics", 2, 4)]);
    }

    #[test]
    fn file_uses_documented_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = open(&dir);
        ledger.append(record(30, "Articulation", 0, 0)).unwrap();

        let raw = std::fs::read_to_string(ledger.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "date": "2024-03-09 14:30",
                "test_type": "Articulation",
                "score": "0/0",
                "percentage": "0.0%"
            }])
        );
    }
}
