//! # View Subscription
//!
//! Receiving side: one handle per open view.

use crate::events::{ClientMessage, MessageFilter};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The registry was dropped.
    #[error("View registry closed")]
    Closed,
}

/// An open view's message inbox. Dropping it closes the view.
pub struct ViewSubscription {
    receiver: broadcast::Receiver<ClientMessage>,
    filter: MessageFilter,
}

impl ViewSubscription {
    pub(crate) fn new(receiver: broadcast::Receiver<ClientMessage>, filter: MessageFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next message that matches the filter.
    ///
    /// Returns `None` once the registry is gone.
    pub async fn recv(&mut self) -> Option<ClientMessage> {
        loop {
            let message = match self.receiver.recv().await {
                Ok(m) => m,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "View lagged, some messages dropped");
                    continue;
                }
            };

            if self.filter.matches(&message) {
                return Some(message);
            }
        }
    }

    /// Non-blocking receive.
    pub fn try_recv(&mut self) -> Result<Option<ClientMessage>, SubscriptionError> {
        loop {
            let message = match self.receiver.try_recv() {
                Ok(m) => m,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&message) {
                return Ok(Some(message));
            }
        }
    }

    /// Drain every message currently buffered for this view.
    pub fn drain(&mut self) -> Vec<ClientMessage> {
        let mut drained = Vec::new();
        while let Ok(Some(message)) = self.try_recv() {
            drained.push(message);
        }
        drained
    }

    #[must_use]
    pub fn filter(&self) -> &MessageFilter {
        &self.filter
    }
}

/// `Stream` adapter over a view subscription.
///
/// Parks on the channel until a message arrives; filtered-out messages are
/// skipped without yielding.
pub struct ViewStream {
    inner: BroadcastStream<ClientMessage>,
    filter: MessageFilter,
}

impl ViewStream {
    #[must_use]
    pub fn new(subscription: ViewSubscription) -> Self {
        let ViewSubscription { receiver, filter } = subscription;
        Self {
            inner: BroadcastStream::new(receiver),
            filter,
        }
    }
}

impl Stream for ViewStream {
    type Item = ClientMessage;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(Ok(message)) if this.filter.matches(&message) => {
                    return Poll::Ready(Some(message))
                }
                Some(Ok(_)) => continue,
                Some(Err(BroadcastStreamRecvError::Lagged(count))) => {
                    debug!(lagged = count, "View stream lagged, some messages dropped");
                }
                None => return Poll::Ready(None),
            }
        }
    }
}
