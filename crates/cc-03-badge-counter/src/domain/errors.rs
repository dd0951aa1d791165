use cc_01_queue_store::KVStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("Badge storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error("Badge storage error: {0}")]
    Storage(#[from] KVStoreError),

    /// The host cannot show an app badge. Not fatal to the count itself.
    #[error("App badge not supported by host")]
    DisplayUnsupported,
}
