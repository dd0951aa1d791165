//! # Inbound Ports (Driving Ports)

use crate::domain::report::SyncReport;
use async_trait::async_trait;
use shared_types::QueueKind;

/// Replay entry point for the host's sync event and manual "sync now".
#[async_trait]
pub trait SyncReplayApi: Send + Sync {
    /// Drain one queue. `false` asks the host to retry later.
    async fn replay(&self, kind: QueueKind) -> bool;

    /// Same pass, with per-record counts.
    async fn replay_with_report(&self, kind: QueueKind) -> SyncReport;
}
