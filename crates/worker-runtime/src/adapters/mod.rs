//! # Host Adapters
//!
//! Host capabilities that only the runtime needs.
//!
//! - `notifications`: showing push notifications
//! - `connectivity`: whether the host believes it is online

pub mod connectivity;
pub mod notifications;

pub use connectivity::{Connectivity, StaticConnectivity};
pub use notifications::{
    LoggingNotificationPresenter, Notification, NotificationError, NotificationPresenter,
    RecordingNotificationPresenter,
};
