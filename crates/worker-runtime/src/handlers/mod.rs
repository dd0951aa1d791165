//! # Host Event Handlers
//!
//! - `events` - Host events, view commands and outcomes
//! - `dispatcher` - Routes each host event to its subsystem
//! - `offline_actions` - Vote/entry submission with offline fallback

pub mod dispatcher;
pub mod events;
pub mod offline_actions;

pub use dispatcher::EventDispatcher;
pub use events::{HostEvent, HostOutcome, ViewCommand};
pub use offline_actions::{OfflineActions, SubmitOutcome};
