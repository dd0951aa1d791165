//! # Background Sync Services
//!
//! - `registrar` - `BackgroundSyncRegistrar`
//! - `replayer` - `SyncReplayer`

mod registrar;
mod replayer;


pub use registrar::BackgroundSyncRegistrar;
pub use replayer::SyncReplayer;
