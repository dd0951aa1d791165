//! # Outbound Ports (Driven Ports)

use crate::domain::errors::{CacheError, NetworkError};
use crate::domain::request::{FetchRequest, FetchResponse};
use async_trait::async_trait;

/// Host cache storage: named partitions of request-keyed responses.
///
/// Production (in-process host): `InMemoryCacheStorage`
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Create the partition if it does not exist yet.
    async fn open(&self, partition: &str) -> Result<(), CacheError>;

    async fn get(&self, partition: &str, key: &str) -> Result<Option<FetchResponse>, CacheError>;

    /// Store `response`, creating the partition if needed.
    async fn put(
        &self,
        partition: &str,
        key: &str,
        response: FetchResponse,
    ) -> Result<(), CacheError>;

    /// `true` if the partition existed.
    async fn delete_partition(&self, partition: &str) -> Result<bool, CacheError>;

    async fn partition_names(&self) -> Result<Vec<String>, CacheError>;
}

/// The real network.
///
/// Production: `HttpNetwork`
/// Testing: `ScriptedNetwork`
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, NetworkError>;
}
