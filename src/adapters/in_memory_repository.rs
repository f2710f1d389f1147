//! In-memory table repository for testing.
//!
//! This adapter provides a pure in-memory implementation of TableRepository,
//! enabling fast tests without any file system I/O. Tables are still encoded
//! to the binary file layout, so decoding errors behave as they would on disk.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Result, codec, error::Error, identifiers::Descriptor, ports::TableRepository,
    registry::TableRecord,
};

/// In-memory repository for testing.
///
/// Stores encoded tables in a shared HashMap keyed by path.
///
/// # Examples
///
/// ```
/// use statematrix::adapters::InMemoryRepository;
/// use statematrix::matrix::QMatrix;
/// use statematrix::ports::TableRepository;
/// use statematrix::registry::TableRecord;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let record = TableRecord::new("q1.dat", QMatrix::new(3, 2)?);
///
/// // Save to "memory" (not disk)
/// repo.save(&record, None)?;
///
/// // Load from "memory"
/// let loaded = repo.load(Path::new("q1.dat"))?;
/// assert_eq!(loaded.num_actions(), 2);
/// # Ok::<(), statematrix::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of tables currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Clear all stored tables.
    pub fn clear(&self) {
        self.storage().clear();
    }

    /// Check if a table exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&Self::key(path))
    }

    /// Store raw bytes at `path`, bypassing the encoder.
    ///
    /// Useful for feeding hand-made or damaged files to the loader.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage().insert(Self::key(path), bytes);
    }

    /// Raw bytes stored at `path`, if any.
    pub fn raw(&self, path: &Path) -> Option<Vec<u8>> {
        self.storage().get(&Self::key(path)).cloned()
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TableRepository for InMemoryRepository {
    fn save(&self, record: &TableRecord, descriptor: Option<Descriptor>) -> Result<()> {
        let bytes = codec::encode_to_vec(record, descriptor);
        self.storage().insert(Self::key(record.filename()), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<TableRecord> {
        let storage = self.storage();
        let bytes = storage.get(&Self::key(path)).ok_or_else(|| Error::Io {
            operation: format!("load table from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        codec::decode(&mut bytes.as_slice(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::QMatrix;

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("test_table");
        let mut matrix = QMatrix::new(2, 2).unwrap();
        matrix.set(0, 1, 3.5).unwrap();
        let record = TableRecord::new(path, matrix);

        // Initially empty
        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        // Save
        repo.save(&record, None).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        // Load
        let loaded = repo.load(path).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        let result = repo.load(Path::new("nonexistent"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_corrupt_raw_bytes() {
        let repo = InMemoryRepository::new();
        let path = Path::new("broken");
        repo.insert_raw(path, vec![1, 2, 3]);
        assert!(matches!(repo.load(path), Err(Error::CorruptFile { .. })));
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        let record = TableRecord::new("shared", QMatrix::new(1, 1).unwrap());
        repo1.save(&record, None).unwrap();

        assert!(repo2.load(Path::new("shared")).is_ok());
        assert_eq!(repo2.count(), 1);

        repo2.clear();
        assert_eq!(repo1.count(), 0);
    }
}
