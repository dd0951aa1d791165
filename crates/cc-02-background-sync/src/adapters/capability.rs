use crate::domain::errors::SyncCapabilityError;
use crate::ports::outbound::SyncCapability;
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

/// Host without background sync. Every registration is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackgroundSync;

#[async_trait]
impl SyncCapability for UnsupportedBackgroundSync {
    async fn register(&self, _tag: &str) -> Result<(), SyncCapabilityError> {
        Err(SyncCapabilityError::Unsupported)
    }
}

/// In-process host: remembers registered tags until the runtime's
/// scheduler collects them.
///
/// Registering a tag that is already pending is a no-op, matching how a
/// host coalesces repeated registrations of one tag.
#[derive(Debug, Default)]
pub struct PendingSyncRegistry {
    pending: Mutex<Vec<String>>,
}

impl PendingSyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending tag, in registration order.
    pub fn take_pending(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn pending(&self) -> Vec<String> {
        self.pending.lock().clone()
    }

    pub fn is_pending(&self, tag: &str) -> bool {
        self.pending.lock().iter().any(|t| t == tag)
    }
}

#[async_trait]
impl SyncCapability for PendingSyncRegistry {
    async fn register(&self, tag: &str) -> Result<(), SyncCapabilityError> {
        if tag.trim().is_empty() {
            return Err(SyncCapabilityError::Rejected {
                tag: tag.to_string(),
                reason: "empty tag".to_string(),
            });
        }

        let mut pending = self.pending.lock();
        if pending.iter().any(|t| t == tag) {
            debug!(tag, "[cc-02] Sync tag already pending");
        } else {
            pending.push(tag.to_string());
        }
        Ok(())
    }
}
