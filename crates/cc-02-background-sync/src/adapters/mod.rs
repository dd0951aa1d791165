//! # Adapters Module
//!
//! - `capability`: host background sync (`PendingSyncRegistry`,
//!   `UnsupportedBackgroundSync`)
//! - `http`: reqwest delivery to the backend endpoints
//! - `scripted`: deterministic delivery for tests and demos

pub mod capability;
pub mod http;
pub mod scripted;

pub use capability::{PendingSyncRegistry, UnsupportedBackgroundSync};
pub use http::{HttpDeliveryClient, HttpDeliveryConfig};
pub use scripted::{DeliveryOutcome, ScriptedDelivery};
