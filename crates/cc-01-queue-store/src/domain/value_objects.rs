//! Queue store configuration.

/// Default attachment limit: 25 MiB.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct QueueStoreConfig {
    /// Attachments larger than this are rejected at enqueue time.
    pub max_attachment_bytes: usize,
}

impl Default for QueueStoreConfig {
    fn default() -> Self {
        Self {
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }
}
