use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("Cache storage unavailable: {0}")]
    Unavailable(String),

    #[error("Cache partition '{0}' could not be opened")]
    PartitionUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// No connection: DNS failure, refused, reset.
    #[error("Network unreachable: {0}")]
    Offline(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Failure surfaced to the host for a static request that has no fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(transparent)]
    Network(#[from] NetworkError),
}
