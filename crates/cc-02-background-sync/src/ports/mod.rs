//! # Ports Layer
//!
//! - `inbound` - What the host runtime drives (`SyncReplayApi`)
//! - `outbound` - What the services depend on (`SyncCapability`, `DeliveryClient`)

pub mod inbound;
pub mod outbound;
