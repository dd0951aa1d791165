//! # Outbound Ports (Driven Ports)

use crate::domain::errors::BadgeError;
use async_trait::async_trait;

/// Host app-icon badge.
///
/// Production without a badge API: `NoBadgeDisplay`
/// Testing: `RecordingBadgeDisplay`
#[async_trait]
pub trait BadgeDisplay: Send + Sync {
    async fn set_badge(&self, count: u64) -> Result<(), BadgeError>;

    async fn clear_badge(&self) -> Result<(), BadgeError>;
}
