//! # Shared Bus - View Registry
//!
//! Delivers worker messages to every open client view (tab/window).
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Sync Replayer│                    │  Open view   │
//! │ Badge Counter│    broadcast()     │  (tab #1..n) │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │ View Registry│          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  open_view()
//! ```
//!
//! Producers only ever see the `ViewRegistry` trait, so tests can swap in
//! `RecordingViewRegistry` without a real multi-window host.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{BadgeCountData, ClientMessage, MessageFilter, MessageTopic, SyncCompletedData};
pub use publisher::{InMemoryViewRegistry, RecordingViewRegistry, ViewRegistry};
pub use subscriber::{SubscriptionError, ViewStream, ViewSubscription};

/// Maximum messages buffered per open view before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;
