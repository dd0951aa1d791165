use cc_02_background_sync::SyncReport;
use cc_04_fetch_interceptor::{FetchError, FetchRequest, FetchResponse, InstallReport};
use serde::{Deserialize, Serialize};
use shared_types::QueueKind;

/// Everything the host can wake the worker for.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// New worker version: precache the static shell.
    Install,
    /// New worker took over: purge stale cache generations.
    Activate,
    /// Connectivity returned for a registered tag.
    Sync { tag: String },
    /// Inbound push message. The payload is usually JSON.
    Push { payload: Option<Vec<u8>> },
    /// The user acted on a notification.
    NotificationClick { url: Option<String> },
    Fetch(FetchRequest),
    /// Command posted by an open view.
    Message(ViewCommand),
}

/// Commands views post to the worker.
///
/// ```json
/// { "type": "SYNC_NOW", "queue": "votes" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewCommand {
    SkipWaiting,
    GetBadgeCount,
    ClearBadge,
    SyncNow { queue: QueueKind },
}

impl ViewCommand {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// What handling an event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutcome {
    Installed(InstallReport),
    Activated { deleted: Vec<String> },
    Synced(SyncReport),
    /// `badge` is `None` when the count could not be updated.
    NotificationShown { badge: Option<u64> },
    /// View the host should focus or open.
    FocusView { url: String },
    Response(FetchResponse),
    FetchFailed(FetchError),
    SkipWaiting,
    BadgeCount(u64),
    /// Event not meant for this worker.
    Ignored,
}
