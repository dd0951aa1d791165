//! # Persistent Queue Store (cc-01)
//!
//! Durable local storage for votes and submissions captured while the
//! client has no network confidence. Records survive process restarts and
//! stay in the store until the sync replayer confirms delivery.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Pending iff undelivered | A record is removed only after remote acceptance |
//! | 2 | No id reuse | Local ids come from a persisted auto-increment counter |
//! | 3 | Durable before return | Record and counter are committed in one atomic batch |
//! | 4 | Validated at the boundary | Malformed records are rejected at enqueue time |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Key layout, configuration, errors
//! - `ports/` - `KeyValueStore` and `StoreOpener` (driven ports)
//! - `adapters/` - In-memory and file-backed stores, openers
//! - `service/` - `QueueStore`, the application service
//!
//! ## Usage
//!
//! ```ignore
//! use cc_01_queue_store::{MemoryOpener, QueueStore};
//! use shared_types::NewVote;
//!
//! let store = QueueStore::new(MemoryOpener::new());
//! let id = store.enqueue_vote(NewVote::new("s1", json!({"stars": 5})))?;
//! assert_eq!(store.list_pending_votes()[0].local_id, id);
//! store.remove_vote(id);
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{
    FileBackedKVStore, FileStoreOpener, InMemoryKVStore, MemoryOpener, SharedStore,
    UnavailableOpener,
};
pub use domain::errors::{KVStoreError, QueueStoreError};
pub use domain::value_objects::QueueStoreConfig;
pub use ports::outbound::{BatchOperation, KeyValueStore, ScanResult, StoreOpener};
pub use service::QueueStore;
