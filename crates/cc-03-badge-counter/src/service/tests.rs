use super::*;
use crate::adapters::{NoBadgeDisplay, RecordingBadgeDisplay};
use cc_01_queue_store::{MemoryOpener, UnavailableOpener};
use shared_bus::RecordingViewRegistry;

struct Harness {
    opener: MemoryOpener,
    views: Arc<RecordingViewRegistry>,
    display: Arc<RecordingBadgeDisplay>,
    counter: Arc<BadgeCounter<MemoryOpener>>,
}

fn make_test_counter() -> Harness {
    let opener = MemoryOpener::new();
    let views = Arc::new(RecordingViewRegistry::new());
    let display = Arc::new(RecordingBadgeDisplay::new());
    let counter = Arc::new(BadgeCounter::new(
        opener.clone(),
        views.clone(),
        display.clone(),
    ));
    Harness {
        opener,
        views,
        display,
        counter,
    }
}

#[tokio::test]
async fn test_starts_at_zero() {
    let h = make_test_counter();
    assert_eq!(h.counter.current().await, 0);
}

#[tokio::test]
async fn test_adjust_broadcasts_new_value() {
    let h = make_test_counter();

    assert_eq!(h.counter.adjust(1).await.unwrap(), 1);
    assert_eq!(h.counter.adjust(1).await.unwrap(), 2);

    assert_eq!(
        h.views.messages(),
        vec![
            ClientMessage::badge_count_updated(1),
            ClientMessage::badge_count_updated(2),
        ]
    );
    assert_eq!(h.display.current(), Some(2));
}

#[tokio::test]
async fn test_large_decrement_clamps_to_zero() {
    let h = make_test_counter();
    h.counter.adjust(2).await.unwrap();

    assert_eq!(h.counter.adjust(-5).await.unwrap(), 0);
    assert_eq!(h.counter.current().await, 0);
    assert_eq!(h.display.current(), None);
}

#[tokio::test]
async fn test_clear_resets_and_broadcasts() {
    let h = make_test_counter();
    h.counter.adjust(4).await.unwrap();
    h.views.clear();

    h.counter.clear().await.unwrap();

    assert_eq!(h.counter.current().await, 0);
    assert_eq!(
        h.views.messages(),
        vec![ClientMessage::badge_count_updated(0)]
    );
}

#[tokio::test]
async fn test_announce_rebroadcasts_without_change() {
    let h = make_test_counter();
    h.counter.adjust(3).await.unwrap();
    h.views.clear();

    assert_eq!(h.counter.announce().await, 3);
    assert_eq!(
        h.views.messages(),
        vec![ClientMessage::badge_count_updated(3)]
    );
}

#[tokio::test]
async fn test_count_shared_with_same_store() {
    let h = make_test_counter();
    h.counter.adjust(2).await.unwrap();

    let other = BadgeCounter::new(
        h.opener.clone(),
        Arc::new(RecordingViewRegistry::new()),
        Arc::new(NoBadgeDisplay),
    );
    assert_eq!(other.current().await, 2);
}

#[tokio::test]
async fn test_corrupt_value_treated_as_zero() {
    let h = make_test_counter();
    h.opener.store().put(BADGE_KEY, b"garbage").unwrap();

    assert_eq!(h.counter.current().await, 0);
    assert_eq!(h.counter.adjust(1).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unavailable_storage() {
    let counter = BadgeCounter::new(
        UnavailableOpener::default(),
        Arc::new(RecordingViewRegistry::new()),
        Arc::new(NoBadgeDisplay),
    );

    assert!(matches!(
        counter.adjust(1).await,
        Err(BadgeError::StorageUnavailable { .. })
    ));
    assert_eq!(counter.current().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adjustments_are_not_lost() {
    let h = make_test_counter();

    let mut handles = Vec::new();
    for _ in 0..50 {
        let counter = h.counter.clone();
        handles.push(tokio::spawn(async move { counter.adjust(1).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(h.counter.current().await, 50);
}
