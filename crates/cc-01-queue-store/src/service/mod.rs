//! # Queue Store Service
//!
//! Application service over the `StoreOpener`/`KeyValueStore` ports.
//!
//! Enqueue operations return errors (`StorageUnavailable`, `InvalidRecord`).
//! Listing returns an empty list on any failure and removal is idempotent;
//! both log instead of failing, so the replayer never aborts on a read.

use crate::domain::errors::QueueStoreError;
use crate::domain::keys::{
    counter_key, decode_counter, encode_counter, high_water_key, record_key, record_prefix,
    FIRST_LOCAL_ID,
};
use crate::domain::value_objects::QueueStoreConfig;
use crate::ports::outbound::{BatchOperation, KeyValueStore, StoreOpener};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::{
    Attachment, LocalId, NewSubmission, NewVote, QueueKind, QueuedSubmission, QueuedVote,
    SystemTimeSource, TimeSource,
};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// Durable queue of votes and submissions awaiting delivery.
pub struct QueueStore<O: StoreOpener, T: TimeSource = SystemTimeSource> {
    opener: O,
    time_source: T,
    config: QueueStoreConfig,
    /// Serialises id allocation: counter read and record write must not
    /// interleave between two enqueues.
    append_lock: Mutex<()>,
}

impl<O: StoreOpener> QueueStore<O, SystemTimeSource> {
    pub fn new(opener: O) -> Self {
        Self::with_parts(opener, SystemTimeSource, QueueStoreConfig::default())
    }
}

impl<O: StoreOpener, T: TimeSource> QueueStore<O, T> {
    pub fn with_parts(opener: O, time_source: T, config: QueueStoreConfig) -> Self {
        Self {
            opener,
            time_source,
            config,
            append_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &QueueStoreConfig {
        &self.config
    }

    // =========================================================================
    // ENQUEUE
    // =========================================================================

    /// Append a vote. Never overwrites an existing record.
    pub fn enqueue_vote(&self, vote: NewVote) -> Result<LocalId, QueueStoreError> {
        vote.validate()?;
        let enqueued_at = self.time_source.now();

        self.append(QueueKind::Votes, |local_id| QueuedVote {
            local_id,
            submission_id: vote.submission_id,
            rating_payload: vote.rating,
            enqueued_at,
        })
    }

    /// Append a submission with an optional binary attachment.
    pub fn enqueue_submission(
        &self,
        submission: NewSubmission,
        attachment: Option<Attachment>,
    ) -> Result<LocalId, QueueStoreError> {
        submission.validate()?;
        if let Some(attachment) = &attachment {
            attachment.validate(self.config.max_attachment_bytes)?;
        }
        let enqueued_at = self.time_source.now();

        self.append(QueueKind::Submissions, |local_id| QueuedSubmission {
            local_id,
            payload: submission.payload,
            attachment,
            enqueued_at,
        })
    }

    fn append<R, F>(&self, kind: QueueKind, build: F) -> Result<LocalId, QueueStoreError>
    where
        R: Serialize,
        F: FnOnce(LocalId) -> R,
    {
        let mut store = self.open()?;
        let _guard = self.append_lock.lock();

        let local_id = next_local_id(&store, kind)?;

        let record = serde_json::to_vec(&build(local_id))?;
        let next = encode_counter(local_id + 1).to_vec();
        store.atomic_batch_write(vec![
            BatchOperation::put(record_key(kind, local_id), record),
            BatchOperation::put(counter_key(kind), next.clone()),
            BatchOperation::put(high_water_key(kind), next),
        ])?;

        info!(queue = %kind, local_id, "[cc-01] Record queued for background sync");
        Ok(local_id)
    }

    // =========================================================================
    // LIST
    // =========================================================================

    /// All undelivered votes in insertion order. Empty on any read failure.
    pub fn list_pending_votes(&self) -> Vec<QueuedVote> {
        self.list(QueueKind::Votes, |vote: &QueuedVote| vote.local_id)
    }

    /// All undelivered submissions in insertion order. Empty on any read failure.
    pub fn list_pending_submissions(&self) -> Vec<QueuedSubmission> {
        self.list(QueueKind::Submissions, |submission: &QueuedSubmission| {
            submission.local_id
        })
    }

    /// Number of undelivered records in a queue. Zero on any read failure.
    pub fn pending_count(&self, kind: QueueKind) -> usize {
        match self.scan(kind) {
            Ok(entries) => entries.len(),
            Err(e) => {
                warn!(queue = %kind, error = %e, "[cc-01] Failed to count pending records");
                0
            }
        }
    }

    /// Whether `local_id` is still waiting for delivery. `false` on any
    /// read failure.
    pub fn is_pending(&self, kind: QueueKind, local_id: LocalId) -> bool {
        self.open()
            .and_then(|store| Ok(store.exists(&record_key(kind, local_id))?))
            .unwrap_or_else(|e| {
                warn!(queue = %kind, local_id, error = %e, "[cc-01] Failed to check record");
                false
            })
    }

    fn list<R, F>(&self, kind: QueueKind, id_of: F) -> Vec<R>
    where
        R: DeserializeOwned,
        F: Fn(&R) -> LocalId,
    {
        let entries = match self.scan(kind) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(queue = %kind, error = %e, "[cc-01] Failed to read pending records");
                return Vec::new();
            }
        };

        let mut records: Vec<R> = entries
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_slice(&value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        queue = %kind,
                        key = %String::from_utf8_lossy(&key),
                        error = %e,
                        "[cc-01] Skipping undecodable record"
                    );
                    None
                }
            })
            .collect();
        records.sort_by_key(|record| id_of(record));
        records
    }

    fn scan(&self, kind: QueueKind) -> Result<Vec<(Vec<u8>, Vec<u8>)>, QueueStoreError> {
        let store = self.open()?;
        Ok(store.prefix_scan(record_prefix(kind))?)
    }

    // =========================================================================
    // REMOVE
    // =========================================================================

    /// Delete a delivered vote. Removing a missing id is a no-op.
    pub fn remove_vote(&self, local_id: LocalId) {
        self.remove(QueueKind::Votes, local_id);
    }

    /// Delete a delivered submission. Removing a missing id is a no-op.
    pub fn remove_submission(&self, local_id: LocalId) {
        self.remove(QueueKind::Submissions, local_id);
    }

    /// Kind-generic removal used by the replayer.
    ///
    /// Returns `false` only when the store rejected the delete; a missing id
    /// counts as removed.
    pub fn remove(&self, kind: QueueKind, local_id: LocalId) -> bool {
        let result = self
            .open()
            .and_then(|mut store| Ok(store.delete(&record_key(kind, local_id))?));

        match result {
            Ok(()) => {
                debug!(queue = %kind, local_id, "[cc-01] Record removed");
                true
            }
            Err(e) => {
                warn!(
                    queue = %kind,
                    local_id,
                    error = %e,
                    "[cc-01] Failed to remove record, it will be replayed again"
                );
                false
            }
        }
    }

    fn open(&self) -> Result<O::Store, QueueStoreError> {
        self.opener
            .open()
            .map_err(|e| QueueStoreError::StorageUnavailable {
                reason: e.to_string(),
            })
    }
}

/// Next id for `kind`, never one that was handed out before.
///
/// A damaged counter falls back to the high-water mark. Records are only
/// consulted on top of it, since removal can leave the newest ids absent.
fn next_local_id<S: KeyValueStore>(
    store: &S,
    kind: QueueKind,
) -> Result<LocalId, QueueStoreError> {
    let read = |key: Vec<u8>| -> Result<Option<Option<LocalId>>, QueueStoreError> {
        Ok(store.get(&key)?.map(|bytes| decode_counter(&bytes)))
    };

    let high_water = read(high_water_key(kind))?;
    match (read(counter_key(kind))?, high_water) {
        (Some(Some(next)), _) => Ok(next),
        (None, None) if highest_record_id(store, kind)?.is_none() => Ok(FIRST_LOCAL_ID),
        (_, Some(Some(high_water))) => {
            let next = highest_record_id(store, kind)?
                .map_or(high_water, |max| high_water.max(max + 1));
            warn!(queue = %kind, next, "[cc-01] Id counter unreadable, resuming from high-water mark");
            Ok(next)
        }
        _ => {
            warn!(queue = %kind, "[cc-01] No readable id counter, refusing to enqueue");
            Err(QueueStoreError::CounterDamaged { queue: kind })
        }
    }
}

fn highest_record_id<S: KeyValueStore>(
    store: &S,
    kind: QueueKind,
) -> Result<Option<LocalId>, QueueStoreError> {
    let prefix = record_prefix(kind);
    Ok(store
        .prefix_scan(prefix)?
        .iter()
        .filter_map(|(key, _)| std::str::from_utf8(&key[prefix.len()..]).ok()?.parse().ok())
        .max())
}
