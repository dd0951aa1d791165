//! # Durability
//!
//! Queued records and the badge count live in the local store, so a
//! worker process that stops and starts again picks up where it left off.

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use cc_01_queue_store::FileStoreOpener;
    use cc_02_background_sync::ScriptedDelivery;
    use cc_04_fetch_interceptor::ScriptedNetwork;
    use serde_json::json;
    use shared_types::{Attachment, NewSubmission, NewVote, QueueKind};
    use worker_runtime::adapters::StaticConnectivity;
    use worker_runtime::{HostCapabilities, HostEvent, HostOutcome, ViewCommand, WorkerConfig, WorkerRuntime};

    fn runtime_at(
        path: &Path,
        delivery: Arc<ScriptedDelivery>,
    ) -> WorkerRuntime<Arc<FileStoreOpener>> {
        let mut host = HostCapabilities::in_process(
            Arc::new(FileStoreOpener::new(path)),
            delivery,
            Arc::new(ScriptedNetwork::new()),
        );
        host.connectivity = Arc::new(StaticConnectivity::offline());
        WorkerRuntime::new(WorkerConfig::default(), host)
    }

    #[tokio::test]
    async fn test_queued_records_replayed_after_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offline-queue.db");

        {
            let runtime = runtime_at(&path, Arc::new(ScriptedDelivery::offline()));
            let actions = runtime.actions();
            actions
                .submit_vote(NewVote::new("s1", json!({ "stars": 5 })))
                .await
                .unwrap();
            actions
                .submit_entry(
                    NewSubmission::new(json!({ "title": "Dawn" })),
                    Some(Attachment::new("image/png", vec![7; 16]).with_file_name("dawn.png")),
                )
                .await
                .unwrap();
        }

        let delivery = Arc::new(ScriptedDelivery::accepting());
        let runtime = runtime_at(&path, delivery.clone());
        assert!(runtime.sync_registry().pending().is_empty());

        assert_eq!(runtime.restore_registrations().await, 2);
        let reports = runtime.run_sync_pass().await;

        assert_eq!(reports.iter().map(|r| r.removed).sum::<usize>(), 2);
        assert_eq!(delivery.accepted_votes()[0].submission_id, "s1");
        let store = &runtime.container().queue_store;
        assert_eq!(store.pending_count(QueueKind::Votes), 0);
        assert_eq!(store.pending_count(QueueKind::Submissions), 0);
    }

    #[tokio::test]
    async fn test_ids_keep_increasing_across_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offline-queue.db");

        {
            let runtime = runtime_at(&path, Arc::new(ScriptedDelivery::accepting()));
            for i in 0..3 {
                runtime
                    .container()
                    .queue_store
                    .enqueue_vote(NewVote::new(format!("s{}", i), json!(1)))
                    .unwrap();
            }
            let outcome = runtime
                .dispatch(HostEvent::Message(ViewCommand::SyncNow {
                    queue: QueueKind::Votes,
                }))
                .await;
            assert!(matches!(outcome, HostOutcome::Synced(report) if report.removed == 3));
        }

        let runtime = runtime_at(&path, Arc::new(ScriptedDelivery::offline()));
        let outcome = runtime
            .actions()
            .submit_vote(NewVote::new("s9", json!(1)))
            .await
            .unwrap();
        assert_eq!(outcome.local_id(), 4);
    }

    #[tokio::test]
    async fn test_badge_count_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offline-queue.db");

        {
            let runtime = runtime_at(&path, Arc::new(ScriptedDelivery::offline()));
            for _ in 0..3 {
                runtime.dispatch(HostEvent::Push { payload: None }).await;
            }
        }

        let runtime = runtime_at(&path, Arc::new(ScriptedDelivery::offline()));
        let outcome = runtime
            .dispatch(HostEvent::Message(ViewCommand::GetBadgeCount))
            .await;
        assert_eq!(outcome, HostOutcome::BadgeCount(3));
    }
}
