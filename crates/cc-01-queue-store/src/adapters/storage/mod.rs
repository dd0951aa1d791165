//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` trait.

mod file;
mod memory;
mod shared;

pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
pub use shared::SharedStore;
