//! CSV-backed dataset storage.
//!
//! The dataset is one CSV file with a header row, read in full by every
//! operation that needs it. Appending rewrites the whole file through a
//! temp-file-plus-rename so a crash mid-write leaves the previous
//! dataset intact.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::data::record::BpRecord;
use crate::error::{Error, Result};

/// Handle on the dataset file.
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full dataset into memory.
    pub fn load(&self) -> Result<Vec<BpRecord>> {
        if !self.path.exists() {
            return Err(Error::Dataset(format!(
                "dataset file not found: {}",
                self.path.display()
            )));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    /// Row count, or zero when the file is absent or unreadable.
    pub fn row_count(&self) -> usize {
        self.load().map(|records| records.len()).unwrap_or(0)
    }

    /// Append validated rows to the end of the dataset, preserving the
    /// order of existing rows, and rewrite the file. Returns the new
    /// total row count.
    pub fn append(&self, new_rows: &[BpRecord]) -> Result<usize> {
        let mut records = self.load()?;
        records.extend_from_slice(new_rows);
        self.write_all(&records)?;

        info!(
            added = new_rows.len(),
            total = records.len(),
            "appended rows to {}",
            self.path.display()
        );
        Ok(records.len())
    }

    fn write_all(&self, records: &[BpRecord]) -> Result<()> {
        let tmp_path = self.path.with_extension("csv.tmp");

        let mut writer = csv::Writer::from_path(&tmp_path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(upper: f64) -> BpRecord {
        BpRecord {
            workday: 1.0,
            stress_levels: 3.0,
            sleep_quality: 7.0,
            tiredness: 2.0,
            upper_bp: upper,
            lower_bp: 80.0,
        }
    }

    fn seeded_store(dir: &tempfile::TempDir) -> DatasetStore {
        let store = DatasetStore::new(dir.path().join("records.csv"));
        let mut writer = csv::Writer::from_path(store.path()).unwrap();
        for upper in [118.0, 122.0, 131.0] {
            writer.serialize(sample(upper)).unwrap();
        }
        writer.flush().unwrap();
        store
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("absent.csv"));
        assert!(store.load().is_err());
        assert_eq!(store.row_count(), 0);
    }

    #[test]
    fn test_append_preserves_existing_rows_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir);

        let before = store.load().unwrap();
        let total = store.append(&[sample(140.0)]).unwrap();
        assert_eq!(total, before.len() + 1);

        let after = store.load().unwrap();
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().unwrap().upper_bp, 140.0);
    }

    #[test]
    fn test_append_to_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("absent.csv"));
        assert!(store.append(&[sample(120.0)]).is_err());
    }
}
