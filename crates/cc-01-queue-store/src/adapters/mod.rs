//! # Adapters Module
//!
//! - `storage`: `KeyValueStore` implementations
//! - `opener`: `StoreOpener` implementations (memory, file, unavailable)

pub mod opener;
pub mod storage;

pub use opener::{FileStoreOpener, MemoryOpener, UnavailableOpener};
pub use storage::{FileBackedKVStore, InMemoryKVStore, SharedStore};
