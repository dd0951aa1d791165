//! # Outbound Ports (Driven Ports)

use crate::domain::errors::{DeliveryError, SyncCapabilityError};
use async_trait::async_trait;
use shared_types::{QueuedSubmission, QueuedVote};
use std::sync::Arc;

/// Host background sync capability.
///
/// Production (in-process host): `PendingSyncRegistry`
/// Host without support: `UnsupportedBackgroundSync`
#[async_trait]
pub trait SyncCapability: Send + Sync {
    /// Ask the host to fire a sync event for `tag` once connectivity returns.
    async fn register(&self, tag: &str) -> Result<(), SyncCapabilityError>;
}

/// Remote endpoints that accept queued records.
///
/// Production: `HttpDeliveryClient`
/// Testing: `ScriptedDelivery`
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn deliver_vote(&self, vote: &QueuedVote) -> Result<(), DeliveryError>;

    async fn deliver_submission(&self, submission: &QueuedSubmission)
        -> Result<(), DeliveryError>;
}

#[async_trait]
impl<T: SyncCapability + ?Sized> SyncCapability for Arc<T> {
    async fn register(&self, tag: &str) -> Result<(), SyncCapabilityError> {
        (**self).register(tag).await
    }
}

#[async_trait]
impl<T: DeliveryClient + ?Sized> DeliveryClient for Arc<T> {
    async fn deliver_vote(&self, vote: &QueuedVote) -> Result<(), DeliveryError> {
        (**self).deliver_vote(vote).await
    }

    async fn deliver_submission(
        &self,
        submission: &QueuedSubmission,
    ) -> Result<(), DeliveryError> {
        (**self).deliver_submission(submission).await
    }
}
