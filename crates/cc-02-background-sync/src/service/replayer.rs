use crate::domain::errors::DeliveryError;
use crate::domain::report::SyncReport;
use crate::ports::inbound::SyncReplayApi;
use crate::ports::outbound::DeliveryClient;
use async_trait::async_trait;
use cc_01_queue_store::{QueueStore, StoreOpener};
use shared_bus::{ClientMessage, ViewRegistry};
use shared_types::{LocalId, QueueKind};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, info_span, warn, Instrument};

/// Drains one queue against the network.
///
/// Records are attempted once each, in insertion order. Accepted ids are
/// removed only after the loop, so a pass that dies midway leaves every
/// record queued and the next pass redelivers it.
///
/// At most one pass per queue runs at a time. A pass that has to wait reads
/// the queue after the previous one removed what it delivered.
pub struct SyncReplayer<O: StoreOpener> {
    store: Arc<QueueStore<O>>,
    delivery: Arc<dyn DeliveryClient>,
    views: Arc<dyn ViewRegistry>,
    votes_pass: Mutex<()>,
    submissions_pass: Mutex<()>,
}

impl<O: StoreOpener> SyncReplayer<O> {
    pub fn new(
        store: Arc<QueueStore<O>>,
        delivery: Arc<dyn DeliveryClient>,
        views: Arc<dyn ViewRegistry>,
    ) -> Self {
        Self {
            store,
            delivery,
            views,
            votes_pass: Mutex::new(()),
            submissions_pass: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<QueueStore<O>> {
        &self.store
    }

    fn pass_lock(&self, kind: QueueKind) -> &Mutex<()> {
        match kind {
            QueueKind::Votes => &self.votes_pass,
            QueueKind::Submissions => &self.submissions_pass,
        }
    }

    async fn attempt_all(&self, kind: QueueKind) -> Vec<(LocalId, Result<(), DeliveryError>)> {
        let mut outcomes = Vec::new();
        match kind {
            QueueKind::Votes => {
                for vote in self.store.list_pending_votes() {
                    let result = self.delivery.deliver_vote(&vote).await;
                    outcomes.push((vote.local_id, result));
                }
            }
            QueueKind::Submissions => {
                for submission in self.store.list_pending_submissions() {
                    let result = self.delivery.deliver_submission(&submission).await;
                    outcomes.push((submission.local_id, result));
                }
            }
        }
        outcomes
    }

    async fn run_pass(&self, kind: QueueKind) -> SyncReport {
        let _pass = self.pass_lock(kind).lock().await;

        let outcomes = self.attempt_all(kind).await;
        let mut report = SyncReport::empty(kind);
        report.attempted = outcomes.len();

        let mut to_remove = Vec::new();
        for (local_id, result) in outcomes {
            match result {
                Ok(()) => to_remove.push(local_id),
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        queue = %kind,
                        local_id,
                        error = %e,
                        "[cc-02] Delivery failed, record stays queued"
                    );
                }
            }
        }
        report.delivered = to_remove.len();

        report.removed = to_remove
            .into_iter()
            .filter(|&local_id| self.store.remove(kind, local_id))
            .count();

        if report.removed > 0 {
            self.views
                .broadcast(ClientMessage::sync_completed(kind, report.removed))
                .await;
        }

        if report.removed < report.delivered {
            warn!(
                queue = %kind,
                stale = report.delivered - report.removed,
                "[cc-02] Delivered records could not be removed and will be sent again"
            );
        }

        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed,
            removed = report.removed,
            "[cc-02] Replay pass finished"
        );
        report
    }
}

#[async_trait]
impl<O: StoreOpener> SyncReplayApi for SyncReplayer<O> {
    async fn replay(&self, kind: QueueKind) -> bool {
        self.replay_with_report(kind).await.is_success()
    }

    async fn replay_with_report(&self, kind: QueueKind) -> SyncReport {
        let span = info_span!("replay", queue = %kind);
        self.run_pass(kind).instrument(span).await
    }
}
