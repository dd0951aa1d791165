//! `StoreOpener` implementations.

use crate::adapters::storage::{FileBackedKVStore, InMemoryKVStore, SharedStore};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::StoreOpener;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Opens a process-local in-memory store. Every open returns the same store.
#[derive(Clone, Default)]
pub struct MemoryOpener {
    store: SharedStore<InMemoryKVStore>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct handle, e.g. for tests that plant or corrupt raw entries.
    pub fn store(&self) -> SharedStore<InMemoryKVStore> {
        self.store.clone()
    }
}

impl StoreOpener for MemoryOpener {
    type Store = SharedStore<InMemoryKVStore>;

    fn open(&self) -> Result<Self::Store, KVStoreError> {
        Ok(self.store.clone())
    }
}

/// Opens the durable file-backed store.
///
/// The file is loaded on the first successful open; later opens share that
/// handle. A failed open is retried on the next call.
pub struct FileStoreOpener {
    path: PathBuf,
    opened: Mutex<Option<SharedStore<FileBackedKVStore>>>,
}

impl FileStoreOpener {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            opened: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreOpener for FileStoreOpener {
    type Store = SharedStore<FileBackedKVStore>;

    fn open(&self) -> Result<Self::Store, KVStoreError> {
        let mut opened = self.opened.lock();
        if let Some(store) = opened.as_ref() {
            return Ok(store.clone());
        }

        let store = SharedStore::new(FileBackedKVStore::open(&self.path)?);
        *opened = Some(store.clone());
        Ok(store)
    }
}

/// Host without local durable storage. Every open fails.
#[derive(Debug, Clone)]
pub struct UnavailableOpener {
    reason: String,
}

impl UnavailableOpener {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailableOpener {
    fn default() -> Self {
        Self::new("local storage not supported by host")
    }
}

impl StoreOpener for UnavailableOpener {
    type Store = InMemoryKVStore;

    fn open(&self) -> Result<Self::Store, KVStoreError> {
        warn!(reason = %self.reason, "[cc-01] Local storage unavailable");
        Err(KVStoreError::Unavailable {
            message: self.reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::KeyValueStore;

    #[test]
    fn test_memory_opener_shares_store() {
        let opener = MemoryOpener::new();
        let mut first = opener.open().unwrap();
        first.put(b"k", b"v").unwrap();

        let second = opener.open().unwrap();
        assert_eq!(second.get(b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_file_opener_reuses_handle() {
        let dir = tempfile::tempdir().unwrap();
        let opener = FileStoreOpener::new(dir.path().join("queue.db"));

        let mut first = opener.open().unwrap();
        first.put(b"k", b"v").unwrap();

        let second = opener.open().unwrap();
        assert_eq!(second.get(b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_file_opener_reports_unreadable_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.db");
        std::fs::write(&path, b"garbage").unwrap();

        let opener = FileStoreOpener::new(&path);
        assert!(opener.open().is_err());
    }

    #[test]
    fn test_unavailable_opener() {
        let opener = UnavailableOpener::default();
        assert!(matches!(
            opener.open(),
            Err(KVStoreError::Unavailable { .. })
        ));
    }
}
