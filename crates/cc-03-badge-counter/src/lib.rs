//! # Badge Counter (cc-03)
//!
//! Unread-notification count shown on the app icon.
//!
//! The count lives in the same local store as the offline queues under a
//! single fixed key. It is never negative: every change goes through
//! `adjust`, which clamps at zero, and every change is broadcast to open
//! views as `BADGE_COUNT_UPDATED`.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Clamping rule, stored encoding, errors
//! - `ports/` - `BadgeDisplay` (host app badge)
//! - `adapters/` - `NoBadgeDisplay`, `RecordingBadgeDisplay`
//! - `service/` - `BadgeCounter`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{NoBadgeDisplay, RecordingBadgeDisplay};
pub use domain::errors::BadgeError;
pub use domain::{apply_delta, BADGE_KEY};
pub use ports::outbound::BadgeDisplay;
pub use service::BadgeCounter;
