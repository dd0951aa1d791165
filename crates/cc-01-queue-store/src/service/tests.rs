use super::*;
use crate::adapters::{FileStoreOpener, MemoryOpener, UnavailableOpener};
use crate::domain::keys::{counter_key, high_water_key, record_key};
use crate::ports::outbound::KeyValueStore;
use chrono::{TimeZone, Utc};
use serde_json::json;
use shared_types::{FixedTimeSource, RecordError};

fn make_test_service() -> (QueueStore<MemoryOpener>, MemoryOpener) {
    let opener = MemoryOpener::new();
    (QueueStore::new(opener.clone()), opener)
}

fn vote(submission_id: &str, stars: u8) -> NewVote {
    NewVote::new(submission_id, json!({ "stars": stars }))
}

// =============================================================================
// ENQUEUE
// =============================================================================

#[test]
fn test_first_ids_start_at_one() {
    let (service, _) = make_test_service();

    assert_eq!(service.enqueue_vote(vote("s1", 5)).unwrap(), 1);
    assert_eq!(service.enqueue_vote(vote("s2", 3)).unwrap(), 2);
}

#[test]
fn test_queues_allocate_ids_independently() {
    let (service, _) = make_test_service();

    service.enqueue_vote(vote("s1", 5)).unwrap();
    service.enqueue_vote(vote("s2", 4)).unwrap();
    let submission_id = service
        .enqueue_submission(NewSubmission::new(json!({ "title": "Dawn" })), None)
        .unwrap();

    assert_eq!(submission_id, 1);
}

#[test]
fn test_enqueue_uses_time_source() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let service = QueueStore::with_parts(
        MemoryOpener::new(),
        FixedTimeSource(at),
        QueueStoreConfig::default(),
    );

    service.enqueue_vote(vote("s1", 5)).unwrap();
    assert_eq!(service.list_pending_votes()[0].enqueued_at, at);
}

#[test]
fn test_invalid_vote_writes_nothing() {
    let (service, opener) = make_test_service();

    let result = service.enqueue_vote(NewVote::new("  ", json!(5)));
    assert!(matches!(
        result,
        Err(QueueStoreError::InvalidRecord(RecordError::BlankSubmissionId))
    ));
    assert!(opener.store().prefix_scan(b"").unwrap().is_empty());
}

#[test]
fn test_oversized_attachment_rejected() {
    let service = QueueStore::with_parts(
        MemoryOpener::new(),
        SystemTimeSource,
        QueueStoreConfig {
            max_attachment_bytes: 4,
        },
    );

    let result = service.enqueue_submission(
        NewSubmission::new(json!({ "title": "Dawn" })),
        Some(Attachment::new("image/png", vec![0; 5])),
    );
    assert!(matches!(
        result,
        Err(QueueStoreError::InvalidRecord(
            RecordError::AttachmentTooLarge { size: 5, max: 4 }
        ))
    ));
    assert!(service.list_pending_submissions().is_empty());
}

#[test]
fn test_unavailable_storage_fails_enqueue() {
    let service = QueueStore::new(UnavailableOpener::default());

    let result = service.enqueue_vote(vote("s1", 5));
    assert!(matches!(
        result,
        Err(QueueStoreError::StorageUnavailable { .. })
    ));
}

// =============================================================================
// LIST
// =============================================================================

#[test]
fn test_list_returns_insertion_order() {
    let (service, _) = make_test_service();

    for i in 0..12 {
        service.enqueue_vote(vote(&format!("s{}", i), 1)).unwrap();
    }

    let ids: Vec<_> = service
        .list_pending_votes()
        .iter()
        .map(|v| v.local_id)
        .collect();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());
}

#[test]
fn test_list_preserves_payload_and_attachment() {
    let (service, _) = make_test_service();
    let attachment = Attachment::new("image/png", vec![1, 2, 3]).with_file_name("dawn.png");

    service
        .enqueue_submission(
            NewSubmission::new(json!({ "title": "Dawn", "tags": ["sky"] })),
            Some(attachment.clone()),
        )
        .unwrap();

    let pending = service.list_pending_submissions();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].payload, json!({ "title": "Dawn", "tags": ["sky"] }));
    assert_eq!(pending[0].attachment, Some(attachment));
}

#[test]
fn test_list_on_unavailable_storage_is_empty() {
    let service = QueueStore::new(UnavailableOpener::default());

    assert!(service.list_pending_votes().is_empty());
    assert!(service.list_pending_submissions().is_empty());
    assert_eq!(service.pending_count(QueueKind::Votes), 0);
}

#[test]
fn test_undecodable_record_is_skipped() {
    let (service, opener) = make_test_service();
    service.enqueue_vote(vote("s1", 5)).unwrap();
    opener
        .store()
        .put(&record_key(QueueKind::Votes, 99), b"{not json")
        .unwrap();

    let pending = service.list_pending_votes();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].submission_id, "s1");
}

// =============================================================================
// REMOVE
// =============================================================================

#[test]
fn test_remove_is_idempotent() {
    let (service, _) = make_test_service();
    let id = service.enqueue_vote(vote("s1", 5)).unwrap();

    service.remove_vote(id);
    service.remove_vote(id);
    service.remove_vote(12345);

    assert!(service.list_pending_votes().is_empty());
}

#[test]
fn test_remove_only_touches_its_queue() {
    let (service, _) = make_test_service();
    service.enqueue_vote(vote("s1", 5)).unwrap();
    service
        .enqueue_submission(NewSubmission::new(json!({ "title": "Dawn" })), None)
        .unwrap();

    service.remove_submission(1);

    assert_eq!(service.pending_count(QueueKind::Votes), 1);
    assert_eq!(service.pending_count(QueueKind::Submissions), 0);
}

#[test]
fn test_ids_not_reused_after_removal() {
    let (service, _) = make_test_service();
    service.enqueue_vote(vote("s1", 5)).unwrap();
    let second = service.enqueue_vote(vote("s2", 5)).unwrap();

    service.remove_vote(second);
    let third = service.enqueue_vote(vote("s3", 5)).unwrap();

    assert_eq!(third, 3);
}

#[test]
fn test_damaged_counter_rebuilt_from_records() {
    let (service, opener) = make_test_service();
    service.enqueue_vote(vote("s1", 5)).unwrap();
    service.enqueue_vote(vote("s2", 5)).unwrap();
    opener
        .store()
        .put(&counter_key(QueueKind::Votes), b"bad")
        .unwrap();

    assert_eq!(service.enqueue_vote(vote("s3", 5)).unwrap(), 3);
}

#[test]
fn test_damaged_counter_after_removal_skips_removed_id() {
    let (service, opener) = make_test_service();
    service.enqueue_vote(vote("s1", 5)).unwrap();
    service.enqueue_vote(vote("s2", 5)).unwrap();
    service.remove_vote(2);
    opener
        .store()
        .put(&counter_key(QueueKind::Votes), b"bad")
        .unwrap();

    assert_eq!(service.enqueue_vote(vote("s3", 5)).unwrap(), 3);
}

#[test]
fn test_missing_counter_with_records_refuses_enqueue() {
    let (service, opener) = make_test_service();
    service.enqueue_vote(vote("s1", 5)).unwrap();
    let mut store = opener.store();
    store.delete(&counter_key(QueueKind::Votes)).unwrap();
    store.put(&high_water_key(QueueKind::Votes), b"bad").unwrap();

    let err = service.enqueue_vote(vote("s2", 5)).unwrap_err();

    assert_eq!(
        err,
        QueueStoreError::CounterDamaged {
            queue: QueueKind::Votes
        }
    );
    assert!(!store.exists(&record_key(QueueKind::Votes, 2)).unwrap());
    assert_eq!(service.pending_count(QueueKind::Votes), 1);
}

#[test]
fn test_damaged_counters_leave_other_queue_usable() {
    let (service, opener) = make_test_service();
    service.enqueue_vote(vote("s1", 5)).unwrap();
    let mut store = opener.store();
    store.put(&counter_key(QueueKind::Votes), b"bad").unwrap();
    store.put(&high_water_key(QueueKind::Votes), b"bad").unwrap();

    assert!(service.enqueue_vote(vote("s2", 5)).is_err());
    assert_eq!(
        service
            .enqueue_submission(NewSubmission::new(json!({ "title": "Dawn" })), None)
            .unwrap(),
        1
    );
}

// =============================================================================
// DURABILITY
// =============================================================================

#[test]
fn test_records_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queue.db");

    {
        let service = QueueStore::new(FileStoreOpener::new(&path));
        service.enqueue_vote(vote("s1", 5)).unwrap();
        service.enqueue_vote(vote("s2", 4)).unwrap();
        service.remove_vote(1);
    }

    let service = QueueStore::new(FileStoreOpener::new(&path));
    let pending = service.list_pending_votes();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].local_id, 2);
    assert_eq!(pending[0].rating_payload, json!({ "stars": 4 }));

    // Counter survived as well.
    assert_eq!(service.enqueue_vote(vote("s3", 1)).unwrap(), 3);
}

#[test]
fn test_remove_reports_store_failure() {
    let service = QueueStore::new(UnavailableOpener::default());
    assert!(!service.remove(QueueKind::Votes, 1));

    let (service, _) = make_test_service();
    assert!(service.remove(QueueKind::Votes, 1));
}

#[test]
fn test_is_pending_tracks_removal() {
    let (service, _) = make_test_service();
    let id = service.enqueue_vote(vote("s1", 5)).unwrap();

    assert!(service.is_pending(QueueKind::Votes, id));
    assert!(!service.is_pending(QueueKind::Submissions, id));

    service.remove_vote(id);
    assert!(!service.is_pending(QueueKind::Votes, id));
}
