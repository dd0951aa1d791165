//! # Domain Errors

use shared_types::{QueueKind, RecordError};
use thiserror::Error;

/// Errors surfaced by `QueueStore` operations.
///
/// Only enqueue operations return errors; listing and removal degrade to a
/// logged safe default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueStoreError {
    /// The durable local store could not be opened. Callers treat this as
    /// "offline persistence disabled".
    #[error("local storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    /// The record was rejected before anything was written.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    /// The store opened but a read or commit failed.
    #[error("local storage error: {0}")]
    Storage(#[from] KVStoreError),

    #[error("record serialization failed: {message}")]
    Serialization { message: String },

    /// Neither the id counter nor the high-water mark is readable, so no
    /// id can be handed out without risking reuse.
    #[error("id counter for {queue} queue is damaged")]
    CounterDamaged { queue: QueueKind },
}

impl From<serde_json::Error> for QueueStoreError {
    fn from(err: serde_json::Error) -> Self {
        QueueStoreError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Key-value adapter errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// The backing store cannot be opened at all.
    #[error("KV store unavailable: {message}")]
    Unavailable { message: String },

    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

impl KVStoreError {
    pub(crate) fn io(err: std::io::Error) -> Self {
        KVStoreError::IOError {
            message: err.to_string(),
        }
    }
}
