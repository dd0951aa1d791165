//! # Background Sync (cc-02)
//!
//! Gets queued votes and submissions to the backend once connectivity
//! returns.
//!
//! - **Registrar**: asks the host to wake the worker for a sync tag
//!   (`sync-votes`, `sync-submissions`). A host without background sync
//!   yields `false`, never an error.
//! - **Replayer**: drains one queue against the network. Each record gets
//!   exactly one attempt per pass; delivered records are removed in a second
//!   pass after the loop and open views receive `SYNC_COMPLETED`.
//!
//! ## Delivery Semantics
//!
//! At-least-once. A record that was accepted remotely but whose removal
//! failed (or whose pass was interrupted) is delivered again on the next
//! pass. The backend is not asked to deduplicate.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Errors, `SyncReport`
//! - `ports/` - `SyncReplayApi` (driving), `SyncCapability` and
//!   `DeliveryClient` (driven)
//! - `adapters/` - Host sync capabilities, HTTP delivery, scripted delivery
//! - `service/` - `BackgroundSyncRegistrar`, `SyncReplayer`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{
    DeliveryOutcome, HttpDeliveryClient, HttpDeliveryConfig, PendingSyncRegistry,
    ScriptedDelivery, UnsupportedBackgroundSync,
};
pub use domain::errors::{DeliveryError, SyncCapabilityError};
pub use domain::report::SyncReport;
pub use ports::inbound::SyncReplayApi;
pub use ports::outbound::{DeliveryClient, SyncCapability};
pub use service::{BackgroundSyncRegistrar, SyncReplayer};
