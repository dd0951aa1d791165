//! # View Registry
//!
//! Publishing side: the worker broadcasts to "all open views".

use crate::events::{ClientMessage, MessageFilter};
use crate::subscriber::{ViewStream, ViewSubscription};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Capability to post a message to every open client view.
///
/// Broadcasting never fails: with no open views the message is dropped.
#[async_trait]
pub trait ViewRegistry: Send + Sync {
    /// Broadcast a message.
    ///
    /// # Returns
    ///
    /// The number of open views that received the message.
    async fn broadcast(&self, message: ClientMessage) -> usize;

    /// Total messages broadcast so far.
    fn messages_broadcast(&self) -> u64;
}

/// In-process view registry.
///
/// Uses `tokio::sync::broadcast` so every open view gets its own copy.
pub struct InMemoryViewRegistry {
    sender: broadcast::Sender<ClientMessage>,
    messages_broadcast: AtomicU64,
    capacity: usize,
}

impl InMemoryViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            messages_broadcast: AtomicU64::new(0),
            capacity,
        }
    }

    /// Register an open view receiving messages that match `filter`.
    ///
    /// The view stays registered until the returned handle is dropped.
    #[must_use]
    pub fn open_view(&self, filter: MessageFilter) -> ViewSubscription {
        debug!(topics = ?filter.topics, "View opened");
        ViewSubscription::new(self.sender.subscribe(), filter)
    }

    /// Convenience: an open view as a `Stream`.
    #[must_use]
    pub fn view_stream(&self, filter: MessageFilter) -> ViewStream {
        ViewStream::new(self.open_view(filter))
    }

    #[must_use]
    pub fn open_views(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ViewRegistry for InMemoryViewRegistry {
    async fn broadcast(&self, message: ClientMessage) -> usize {
        let topic = message.topic();
        self.messages_broadcast.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(message) {
            Ok(receivers) => {
                debug!(topic = ?topic, receivers, "Message broadcast to views");
                receivers
            }
            Err(_) => {
                debug!(topic = ?topic, "No open views, message dropped");
                0
            }
        }
    }

    fn messages_broadcast(&self) -> u64 {
        self.messages_broadcast.load(Ordering::Relaxed)
    }
}

/// View registry that records every message, for tests and diagnostics.
#[derive(Default)]
pub struct RecordingViewRegistry {
    messages: Mutex<Vec<ClientMessage>>,
}

impl RecordingViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything broadcast so far, oldest first.
    pub fn messages(&self) -> Vec<ClientMessage> {
        self.messages.lock().clone()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

#[async_trait]
impl ViewRegistry for RecordingViewRegistry {
    async fn broadcast(&self, message: ClientMessage) -> usize {
        self.messages.lock().push(message);
        1
    }

    fn messages_broadcast(&self) -> u64 {
        self.messages.lock().len() as u64
    }
}
