use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

pub const DEFAULT_TITLE: &str = "CreativeCrowdChallenge";
pub const DEFAULT_BODY: &str = "There is something new for you.";
pub const DEFAULT_URL: &str = "/";

/// A notification built from a push payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// View to focus when the notification is clicked.
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
struct PushPayload {
    title: Option<String>,
    body: Option<String>,
    url: Option<String>,
}

impl Notification {
    /// Parse a push payload. Missing fields, or a payload that is absent or
    /// not JSON, fall back to the defaults.
    pub fn from_push_payload(payload: Option<&[u8]>) -> Self {
        let parsed: PushPayload = payload
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
            .unwrap_or_default();

        Self {
            title: non_blank(parsed.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: non_blank(parsed.body).unwrap_or_else(|| DEFAULT_BODY.to_string()),
            url: non_blank(parsed.url).unwrap_or_else(|| DEFAULT_URL.to_string()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notifications not supported by host")]
    Unsupported,

    #[error("Notification permission denied")]
    PermissionDenied,
}

/// Host notification surface.
#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    async fn show(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// In-process host: notifications go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationPresenter;

#[async_trait]
impl NotificationPresenter for LoggingNotificationPresenter {
    async fn show(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            title = %notification.title,
            body = %notification.body,
            url = %notification.url,
            "[runtime] Notification"
        );
        Ok(())
    }
}

/// Keeps every shown notification, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotificationPresenter {
    shown: Mutex<Vec<Notification>>,
}

impl RecordingNotificationPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().clone()
    }
}

#[async_trait]
impl NotificationPresenter for RecordingNotificationPresenter {
    async fn show(&self, notification: &Notification) -> Result<(), NotificationError> {
        self.shown.lock().push(notification.clone());
        Ok(())
    }
}
