//! # Integration Flows
//!
//! A view submits while the host is offline, the scheduler replays once
//! the backend answers again, and open views hear about it.
//!
//! ```text
//! OfflineActions ──→ Queue Store ──→ Registrar ──→ sync tag
//!                                                     │
//! run_sync_pass ──Sync{tag}──→ Replayer ──→ backend ──┘
//!                                 │
//!                                 └──→ SYNC_COMPLETED ──→ open views
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use cc_01_queue_store::MemoryOpener;
    use cc_02_background_sync::{DeliveryOutcome, ScriptedDelivery};
    use cc_04_fetch_interceptor::{
        FetchRequest, FetchResponse, InMemoryCacheStorage, ScriptedNetwork, OFFLINE_MESSAGE,
    };
    use serde_json::json;
    use shared_bus::{ClientMessage, InMemoryViewRegistry, MessageFilter, MessageTopic};
    use shared_types::{NewSubmission, NewVote, QueueKind};
    use tokio::time::timeout;
    use worker_runtime::adapters::StaticConnectivity;
    use worker_runtime::{
        HostCapabilities, HostEvent, HostOutcome, SubmitOutcome, ViewCommand, WorkerConfig,
        WorkerRuntime,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct World {
        runtime: WorkerRuntime<MemoryOpener>,
        delivery: Arc<ScriptedDelivery>,
        network: Arc<ScriptedNetwork>,
        views: Arc<InMemoryViewRegistry>,
        link: Arc<StaticConnectivity>,
    }

    fn offline_world() -> World {
        let delivery = Arc::new(ScriptedDelivery::offline());
        let network = Arc::new(ScriptedNetwork::new());
        network.set_offline(true);
        let views = Arc::new(InMemoryViewRegistry::new());
        let link = Arc::new(StaticConnectivity::offline());

        let mut host =
            HostCapabilities::in_process(MemoryOpener::new(), delivery.clone(), network.clone());
        host.views = views.clone();
        host.connectivity = link.clone();

        World {
            runtime: WorkerRuntime::new(WorkerConfig::default(), host),
            delivery,
            network,
            views,
            link,
        }
    }

    impl World {
        fn reconnect(&self) {
            self.delivery.set_default(DeliveryOutcome::Accept);
            self.network.set_offline(false);
            self.link.set_online(true);
        }
    }

    fn vote(submission_id: &str, stars: u8) -> NewVote {
        NewVote::new(submission_id, json!({ "stars": stars }))
    }

    // =============================================================================
    // SUBMIT → SYNC
    // =============================================================================

    /// Two queued votes, the backend rejects the second: only the second
    /// stays queued and views see one SYNC_COMPLETED for the first.
    #[tokio::test]
    async fn test_partial_sync_keeps_rejected_vote() {
        let world = offline_world();
        let mut view = world.views.open_view(MessageFilter::topics(vec![MessageTopic::Sync]));
        let actions = world.runtime.actions();

        actions.submit_vote(vote("s1", 5)).await.unwrap();
        actions.submit_vote(vote("s2", 1)).await.unwrap();

        world.reconnect();
        world
            .delivery
            .script(QueueKind::Votes, 2, DeliveryOutcome::Reject(500));
        world.runtime.run_sync_pass().await;

        let pending: Vec<_> = world
            .runtime
            .container()
            .queue_store
            .list_pending_votes()
            .iter()
            .map(|v| v.local_id)
            .collect();
        assert_eq!(pending, vec![2]);

        let message = timeout(Duration::from_secs(1), view.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(message, ClientMessage::sync_completed(QueueKind::Votes, 1));
        assert!(view.try_recv().unwrap().is_none());

        // Still registered, so the next pass retries it.
        assert!(world.runtime.sync_registry().is_pending("sync-votes"));
    }

    #[tokio::test]
    async fn test_offline_submissions_delivered_after_reconnect() {
        let world = offline_world();
        let actions = world.runtime.actions();

        let vote_outcome = actions.submit_vote(vote("s1", 4)).await.unwrap();
        let entry_outcome = actions
            .submit_entry(NewSubmission::new(json!({ "title": "Dawn", "challengeId": 7 })), None)
            .await
            .unwrap();
        assert!(matches!(vote_outcome, SubmitOutcome::Queued { sync_registered: true, .. }));
        assert!(matches!(entry_outcome, SubmitOutcome::Queued { sync_registered: true, .. }));

        world.reconnect();
        let reports = world.runtime.run_sync_pass().await;

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.is_success()));
        assert!(world.runtime.sync_registry().pending().is_empty());
        assert_eq!(world.delivery.accepted_votes().len(), 1);
        assert_eq!(
            world.delivery.accepted_submissions()[0].payload,
            json!({ "title": "Dawn", "challengeId": 7 })
        );

        // Once online, a new vote skips the queue.
        let outcome = actions.submit_vote(vote("s2", 2)).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Delivered { local_id: 2 });
    }

    #[tokio::test]
    async fn test_sync_now_from_view() {
        let world = offline_world();
        world.runtime.actions().submit_vote(vote("s1", 3)).await.unwrap();
        world.reconnect();

        let command = ViewCommand::parse(r#"{"type":"SYNC_NOW","queue":"votes"}"#).unwrap();
        let outcome = world.runtime.dispatch(HostEvent::Message(command)).await;

        assert!(matches!(outcome, HostOutcome::Synced(report) if report.removed == 1));
    }

    // =============================================================================
    // PUSH → BADGE
    // =============================================================================

    #[tokio::test]
    async fn test_badge_follows_push_and_click() {
        let world = offline_world();
        let mut view = world.views.open_view(MessageFilter::topics(vec![MessageTopic::Badge]));

        world.runtime.dispatch(HostEvent::Push { payload: None }).await;
        world
            .runtime
            .dispatch(HostEvent::Push {
                payload: Some(br#"{"title":"Results","url":"/challenges/7/results"}"#.to_vec()),
            })
            .await;
        let outcome = world
            .runtime
            .dispatch(HostEvent::NotificationClick {
                url: Some("/challenges/7/results".to_string()),
            })
            .await;
        assert_eq!(
            outcome,
            HostOutcome::FocusView {
                url: "/challenges/7/results".to_string()
            }
        );

        let counts: Vec<_> = view
            .drain()
            .into_iter()
            .map(|m| match m {
                ClientMessage::BadgeCountUpdated(data) => data.count,
                other => panic!("unexpected message {:?}", other),
            })
            .collect();
        assert_eq!(counts, vec![1, 2, 1]);
    }

    // =============================================================================
    // FETCH
    // =============================================================================

    #[tokio::test]
    async fn test_api_request_offline_gets_json_notice() {
        let world = offline_world();

        let outcome = world
            .runtime
            .dispatch(HostEvent::Fetch(FetchRequest::get("/api/challenges")))
            .await;

        let HostOutcome::Response(response) = outcome else {
            panic!("expected a response, got {:?}", outcome);
        };
        assert_eq!(response.status, 503);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.body_json().unwrap()["message"], OFFLINE_MESSAGE);
    }

    #[tokio::test]
    async fn test_cached_api_response_served_offline() {
        let world = offline_world();
        world.network.set_offline(false);
        world.network.respond(
            "/api/challenges",
            FetchResponse::json(200, &json!([{ "id": 7 }])),
        );
        world
            .runtime
            .dispatch(HostEvent::Fetch(FetchRequest::get("/api/challenges")))
            .await;

        world.network.set_offline(true);
        let outcome = world
            .runtime
            .dispatch(HostEvent::Fetch(FetchRequest::get("/api/challenges")))
            .await;

        let HostOutcome::Response(response) = outcome else {
            panic!("expected a response, got {:?}", outcome);
        };
        assert_eq!(response.status, 200);
        assert_eq!(response.body_json().unwrap(), json!([{ "id": 7 }]));
    }

    #[tokio::test]
    async fn test_new_cache_version_purges_previous_generation() {
        let cache = Arc::new(InMemoryCacheStorage::new());
        let network = Arc::new(ScriptedNetwork::new());
        for url in WorkerConfig::default().cache.precache_urls {
            network.respond(url, FetchResponse::ok("shell"));
        }
        network.respond("/api/challenges", FetchResponse::json(200, &json!([])));

        let runtime_for = |version: u32| {
            let mut host = HostCapabilities::in_process(
                MemoryOpener::new(),
                Arc::new(ScriptedDelivery::accepting()),
                network.clone(),
            );
            host.cache = cache.clone();
            let mut config = WorkerConfig::default();
            config.cache.version = version;
            WorkerRuntime::new(config, host)
        };

        let v1 = runtime_for(1);
        v1.dispatch(HostEvent::Install).await;
        v1.dispatch(HostEvent::Fetch(FetchRequest::get("/api/challenges")))
            .await;

        let v2 = runtime_for(2);
        v2.dispatch(HostEvent::Install).await;
        let HostOutcome::Activated { mut deleted } = v2.dispatch(HostEvent::Activate).await else {
            panic!("expected activation");
        };
        deleted.sort();

        assert_eq!(
            deleted,
            vec!["ccc-api-v1".to_string(), "ccc-static-v1".to_string()]
        );
    }
}
