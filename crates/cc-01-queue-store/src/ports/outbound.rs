//! # Outbound Ports (Driven Ports)
//!
//! Local durable storage the host platform provides.

use crate::domain::errors::KVStoreError;
use std::sync::Arc;

/// Result of a prefix scan: `(key, value)` pairs in no particular order.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value storage.
///
/// Production: `FileBackedKVStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are durable on return, or NONE are.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError>;

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone)]
pub enum BatchOperation {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

/// Opens the local store.
///
/// Opening is where missing or blocked storage shows up; an `Err` here is
/// what callers see as `StorageUnavailable`.
pub trait StoreOpener: Send + Sync {
    type Store: KeyValueStore;

    fn open(&self) -> Result<Self::Store, KVStoreError>;
}

impl<O: StoreOpener + ?Sized> StoreOpener for Arc<O> {
    type Store = O::Store;

    fn open(&self) -> Result<Self::Store, KVStoreError> {
        (**self).open()
    }
}
