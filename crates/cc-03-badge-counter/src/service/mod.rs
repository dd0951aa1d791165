//! # Badge Counter Service

use crate::domain::errors::BadgeError;
use crate::domain::{apply_delta, decode_count, encode_count, BADGE_KEY};
use crate::ports::outbound::BadgeDisplay;
use cc_01_queue_store::{KeyValueStore, StoreOpener};
use shared_bus::{ClientMessage, ViewRegistry};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// Persisted, non-negative badge count.
///
/// Read-modify-write runs under an async mutex so concurrent push and
/// notification-click events cannot lose an update.
pub struct BadgeCounter<O: StoreOpener> {
    opener: O,
    views: Arc<dyn ViewRegistry>,
    display: Arc<dyn BadgeDisplay>,
    update_lock: Mutex<()>,
}

impl<O: StoreOpener> BadgeCounter<O> {
    pub fn new(opener: O, views: Arc<dyn ViewRegistry>, display: Arc<dyn BadgeDisplay>) -> Self {
        Self {
            opener,
            views,
            display,
            update_lock: Mutex::new(()),
        }
    }

    /// Apply `delta`, floored at zero; persist and broadcast the result.
    pub async fn adjust(&self, delta: i64) -> Result<u64, BadgeError> {
        let _guard = self.update_lock.lock().await;

        let mut store = self.open()?;
        let current = read_count(&store)?;
        let next = apply_delta(current, delta);
        store.put(BADGE_KEY, &encode_count(next))?;
        debug!(current, delta, next, "[cc-03] Badge adjusted");

        self.publish(next).await;
        Ok(next)
    }

    /// Stored count. Zero when nothing (or nothing readable) is stored.
    pub async fn current(&self) -> u64 {
        let _guard = self.update_lock.lock().await;
        match self.open().and_then(|store| read_count(&store)) {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "[cc-03] Failed to read badge count");
                0
            }
        }
    }

    /// Re-broadcast the stored count, e.g. when a view asks for it.
    pub async fn announce(&self) -> u64 {
        let count = self.current().await;
        self.views
            .broadcast(ClientMessage::badge_count_updated(count))
            .await;
        count
    }

    /// Reset to zero.
    pub async fn clear(&self) -> Result<(), BadgeError> {
        let _guard = self.update_lock.lock().await;

        let mut store = self.open()?;
        store.put(BADGE_KEY, &encode_count(0))?;
        info!("[cc-03] Badge cleared");

        self.publish(0).await;
        Ok(())
    }

    async fn publish(&self, count: u64) {
        self.views
            .broadcast(ClientMessage::badge_count_updated(count))
            .await;

        let shown = if count == 0 {
            self.display.clear_badge().await
        } else {
            self.display.set_badge(count).await
        };
        if let Err(e) = shown {
            debug!(error = %e, "[cc-03] App badge not updated");
        }
    }

    fn open(&self) -> Result<O::Store, BadgeError> {
        self.opener
            .open()
            .map_err(|e| BadgeError::StorageUnavailable {
                reason: e.to_string(),
            })
    }
}

fn read_count<S: KeyValueStore>(store: &S) -> Result<u64, BadgeError> {
    Ok(match store.get(BADGE_KEY)? {
        Some(bytes) => decode_count(&bytes).unwrap_or_else(|| {
            warn!("[cc-03] Stored badge count unreadable, treating as zero");
            0
        }),
        None => 0,
    })
}
