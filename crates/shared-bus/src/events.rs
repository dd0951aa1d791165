//! # Client Messages
//!
//! Messages the worker posts to open views. The JSON shape is part of the
//! contract with the web client:
//!
//! ```json
//! { "type": "SYNC_COMPLETED", "data": { "type": "votes", "count": 1 } }
//! { "type": "BADGE_COUNT_UPDATED", "data": { "count": 3 } }
//! ```

use serde::{Deserialize, Serialize};
use shared_types::QueueKind;

/// All messages that can be broadcast to open views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// A replay pass removed at least one delivered record.
    SyncCompleted(SyncCompletedData),

    /// The persisted badge count changed (or was re-announced).
    BadgeCountUpdated(BadgeCountData),
}

/// Payload of `SYNC_COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCompletedData {
    #[serde(rename = "type")]
    pub kind: QueueKind,
    pub count: usize,
}

/// Payload of `BADGE_COUNT_UPDATED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCountData {
    pub count: u64,
}

impl ClientMessage {
    pub fn sync_completed(kind: QueueKind, count: usize) -> Self {
        ClientMessage::SyncCompleted(SyncCompletedData { kind, count })
    }

    pub fn badge_count_updated(count: u64) -> Self {
        ClientMessage::BadgeCountUpdated(BadgeCountData { count })
    }

    #[must_use]
    pub fn topic(&self) -> MessageTopic {
        match self {
            ClientMessage::SyncCompleted(_) => MessageTopic::Sync,
            ClientMessage::BadgeCountUpdated(_) => MessageTopic::Badge,
        }
    }
}

/// Topics views can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTopic {
    Sync,
    Badge,
    All,
}

/// Filter for view subscriptions.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<MessageTopic>,
}

impl MessageFilter {
    /// Create a filter that accepts all messages.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<MessageTopic>) -> Self {
        Self { topics }
    }

    /// Check if a message matches this filter.
    #[must_use]
    pub fn matches(&self, message: &ClientMessage) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&MessageTopic::All)
            || self.topics.contains(&message.topic())
    }
}
