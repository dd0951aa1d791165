use crate::domain::errors::SyncCapabilityError;
use crate::ports::outbound::SyncCapability;
use shared_types::QueueKind;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Asks the host to wake the worker for a sync tag.
pub struct BackgroundSyncRegistrar {
    capability: Arc<dyn SyncCapability>,
}

impl BackgroundSyncRegistrar {
    pub fn new(capability: Arc<dyn SyncCapability>) -> Self {
        Self { capability }
    }

    /// `true` once the host accepted the tag. A host without background
    /// sync, or one that refuses the tag, yields `false`.
    pub async fn register_sync(&self, tag: &str) -> bool {
        match self.capability.register(tag).await {
            Ok(()) => {
                info!(tag, "[cc-02] Background sync registered");
                true
            }
            Err(SyncCapabilityError::Unsupported) => {
                debug!(tag, "[cc-02] Background sync unsupported by host");
                false
            }
            Err(e) => {
                warn!(tag, error = %e, "[cc-02] Background sync registration failed");
                false
            }
        }
    }

    /// Register the tag that drains `kind`.
    pub async fn register_queue(&self, kind: QueueKind) -> bool {
        self.register_sync(kind.sync_tag()).await
    }
}
