use crate::domain::errors::BadgeError;
use crate::ports::outbound::BadgeDisplay;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Host without an app badge.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBadgeDisplay;

#[async_trait]
impl BadgeDisplay for NoBadgeDisplay {
    async fn set_badge(&self, _count: u64) -> Result<(), BadgeError> {
        Err(BadgeError::DisplayUnsupported)
    }

    async fn clear_badge(&self) -> Result<(), BadgeError> {
        Err(BadgeError::DisplayUnsupported)
    }
}

/// Remembers what the badge shows. `None` means cleared.
#[derive(Debug, Default)]
pub struct RecordingBadgeDisplay {
    shown: Mutex<Vec<Option<u64>>>,
}

impl RecordingBadgeDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the icon currently shows.
    pub fn current(&self) -> Option<u64> {
        self.shown.lock().last().copied().flatten()
    }

    /// Every update, oldest first.
    pub fn history(&self) -> Vec<Option<u64>> {
        self.shown.lock().clone()
    }
}

#[async_trait]
impl BadgeDisplay for RecordingBadgeDisplay {
    async fn set_badge(&self, count: u64) -> Result<(), BadgeError> {
        self.shown.lock().push(Some(count));
        Ok(())
    }

    async fn clear_badge(&self) -> Result<(), BadgeError> {
        self.shown.lock().push(None);
        Ok(())
    }
}
