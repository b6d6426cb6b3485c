// 🗂️ History Store - previously selected codes
// CSV with a `number` header. Append rewrites the whole file; clear deletes it.

use crate::code::Code;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Column header of the history file
pub const HISTORY_COLUMN: &str = "number";

#[derive(Debug, Deserialize)]
struct HistoryRow {
    number: String,
}

// ============================================================================
// HISTORY (loaded value)
// ============================================================================

/// Ordered, never deduplicated. Membership is by exact code equality.
#[derive(Debug, Clone, Default)]
pub struct History {
    codes: Vec<Code>,
    index: HashSet<Code>,
}

impl History {
    pub fn new(codes: Vec<Code>) -> Self {
        let index = codes.iter().cloned().collect();
        History { codes, index }
    }

    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &Code) -> bool {
        self.index.contains(code)
    }

    /// Loaded history followed by the new selection
    fn extended(&self, selection: &[Code]) -> History {
        let mut codes = self.codes.clone();
        codes.extend_from_slice(selection);
        History::new(codes)
    }
}

// ============================================================================
// HISTORY STORE (flat file)
// ============================================================================

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HistoryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absent or zero-byte file is an empty history, not an error.
    /// Anything that is not a `number` column of 5-digit codes is `HistoryCorrupt`.
    pub fn load(&self) -> Result<History> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() == 0 => return Ok(History::default()),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(History::default()),
            Err(e) => return Err(e.into()),
        }

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let has_column = rdr
            .headers()
            .map_err(|e| self.corrupt(e.to_string()))?
            .iter()
            .any(|h| h == HISTORY_COLUMN);
        if !has_column {
            return Err(self.corrupt(format!("missing '{}' column", HISTORY_COLUMN)));
        }

        let mut codes = Vec::new();
        for result in rdr.deserialize::<HistoryRow>() {
            let row = result.map_err(|e| self.corrupt(e.to_string()))?;
            let code = Code::parse(&row.number).map_err(|e| self.corrupt(e.to_string()))?;
            codes.push(code);
        }

        info!("Loaded {} history entries from {}", codes.len(), self.path.display());
        Ok(History::new(codes))
    }

    /// Delete the history file. Clearing an absent file is a no-op.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared history {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist `loaded ++ selection`, overwriting the file.
    ///
    /// `loaded` is the snapshot taken at the start of the action; the file is
    /// not re-read here, so a concurrent writer's rows are lost (last write wins).
    pub fn append(&self, loaded: &History, selection: &[Code]) -> Result<History> {
        let updated = loaded.extended(selection);

        let mut wtr = csv::Writer::from_path(&self.path)?;
        wtr.write_record([HISTORY_COLUMN])?;
        for code in updated.codes() {
            wtr.write_record([code.as_str()])?;
        }
        wtr.flush()?;

        info!(
            "Saved {} new codes to history ({} total)",
            selection.len(),
            updated.len()
        );
        Ok(updated)
    }

    fn corrupt(&self, reason: String) -> Error {
        warn!("History file {} is unreadable: {}", self.path.display(), reason);
        Error::HistoryCorrupt {
            path: self.path.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn codes(values: &[&str]) -> Vec<Code> {
        values.iter().map(|v| Code::parse(v).unwrap()).collect()
    }

    fn store(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history_selected.csv"))
    }

    #[test]
    fn test_absent_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn test_zero_byte_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "number\n").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load_keeps_order_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let first = store.append(&History::default(), &codes(&["13579", "24680"])).unwrap();
        let second = store.append(&first, &codes(&["13579"])).unwrap();
        assert_eq!(second.len(), 3);

        let loaded = store.load().unwrap();
        let values: Vec<&str> = loaded.codes().iter().map(Code::as_str).collect();
        assert_eq!(values, vec!["13579", "24680", "13579"]);
        assert!(loaded.contains(&Code::parse("24680").unwrap()));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("number\n"));
    }

    #[test]
    fn test_append_uses_snapshot_not_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let snapshot = store.load().unwrap();
        // Another session writes in between
        store.append(&History::default(), &codes(&["11111"])).unwrap();
        // Last writer wins: the other session's row is gone
        store.append(&snapshot, &codes(&["22222"])).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.codes(), codes(&["22222"]).as_slice());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .append(&History::default(), &codes(&["11111", "22222", "33333"]))
            .unwrap();
        assert_eq!(store.load().unwrap().len(), 3);

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_empty());

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_missing_column_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "code\n12345\n").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::HistoryCorrupt { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_bad_value_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "number\n12345\n123\n").unwrap();

        assert!(matches!(store.load().unwrap_err(), Error::HistoryCorrupt { .. }));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::write(store.path(), "number,note\n12345,first\n").unwrap();

        assert_eq!(store.load().unwrap().len(), 1);
    }
}
