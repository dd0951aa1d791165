//! # Worker Container
//!
//! Holds every subsystem instance with its adapters injected.

pub mod config;
pub mod subsystems;

pub use config::{ApiConfig, CacheConfig, ConfigError, StorageConfig, SyncConfig, WorkerConfig};
pub use subsystems::{HostCapabilities, WorkerContainer};
