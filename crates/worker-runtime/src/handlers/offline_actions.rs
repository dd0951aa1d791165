//! # Offline Actions
//!
//! Entry points the views call to cast a vote or submit an entry. The
//! record is always queued first; delivery happens through the replayer,
//! immediately when the host believes it is online and otherwise on the
//! next background sync.

use std::sync::Arc;

use cc_01_queue_store::{QueueStoreError, StoreOpener};
use cc_02_background_sync::SyncReplayApi;
use shared_types::{Attachment, LocalId, NewSubmission, NewVote, QueueKind};
use tracing::{debug, info, warn};

use crate::container::WorkerContainer;

/// Where a submitted record ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted by the backend and no longer queued.
    Delivered { local_id: LocalId },
    /// Waiting in the queue. `sync_registered` is false when the host
    /// refused the background sync registration.
    Queued {
        local_id: LocalId,
        sync_registered: bool,
    },
}

impl SubmitOutcome {
    pub fn local_id(&self) -> LocalId {
        match self {
            Self::Delivered { local_id } | Self::Queued { local_id, .. } => *local_id,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

pub struct OfflineActions<O: StoreOpener + Clone> {
    container: Arc<WorkerContainer<O>>,
}

impl<O: StoreOpener + Clone + 'static> OfflineActions<O> {
    pub fn new(container: Arc<WorkerContainer<O>>) -> Self {
        Self { container }
    }

    pub async fn submit_vote(&self, vote: NewVote) -> Result<SubmitOutcome, QueueStoreError> {
        let local_id = self.container.queue_store.enqueue_vote(vote)?;
        Ok(self.settle(QueueKind::Votes, local_id).await)
    }

    pub async fn submit_entry(
        &self,
        entry: NewSubmission,
        attachment: Option<Attachment>,
    ) -> Result<SubmitOutcome, QueueStoreError> {
        let local_id = self
            .container
            .queue_store
            .enqueue_submission(entry, attachment)?;
        Ok(self.settle(QueueKind::Submissions, local_id).await)
    }

    /// Try to deliver a freshly queued record, falling back to background
    /// sync while it stays queued.
    async fn settle(&self, kind: QueueKind, local_id: LocalId) -> SubmitOutcome {
        let mut attempted = false;
        if self.container.connectivity.is_online() {
            self.container.replayer.replay(kind).await;
            attempted = true;
        } else {
            debug!(queue = %kind, local_id, "[runtime] Offline, deferring delivery");
        }

        if !self.container.queue_store.is_pending(kind, local_id) {
            info!(queue = %kind, local_id, "[runtime] Delivered without queuing");
            return SubmitOutcome::Delivered { local_id };
        }

        let sync_registered = self.container.registrar.register_queue(kind).await;
        if sync_registered {
            return SubmitOutcome::Queued {
                local_id,
                sync_registered,
            };
        }

        // No background sync on this host: one direct pass is the only
        // delivery chance until the next explicit SYNC_NOW.
        warn!(queue = %kind, local_id, "[runtime] Background sync unavailable");
        if !attempted {
            self.container.replayer.replay(kind).await;
            if !self.container.queue_store.is_pending(kind, local_id) {
                return SubmitOutcome::Delivered { local_id };
            }
        }

        SubmitOutcome::Queued {
            local_id,
            sync_registered: false,
        }
    }
}
