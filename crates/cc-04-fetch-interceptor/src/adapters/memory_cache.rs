use crate::domain::errors::CacheError;
use crate::domain::request::FetchResponse;
use crate::ports::outbound::CacheStorage;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

type Partition = HashMap<String, FetchResponse>;

/// Cache partitions held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCacheStorage {
    partitions: RwLock<BTreeMap<String, Partition>>,
}

impl InMemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in a partition, 0 if it does not exist.
    pub fn entry_count(&self, partition: &str) -> usize {
        self.partitions
            .read()
            .get(partition)
            .map_or(0, |entries| entries.len())
    }
}

#[async_trait]
impl CacheStorage for InMemoryCacheStorage {
    async fn open(&self, partition: &str) -> Result<(), CacheError> {
        self.partitions
            .write()
            .entry(partition.to_string())
            .or_default();
        Ok(())
    }

    async fn get(&self, partition: &str, key: &str) -> Result<Option<FetchResponse>, CacheError> {
        Ok(self
            .partitions
            .read()
            .get(partition)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn put(
        &self,
        partition: &str,
        key: &str,
        response: FetchResponse,
    ) -> Result<(), CacheError> {
        self.partitions
            .write()
            .entry(partition.to_string())
            .or_default()
            .insert(key.to_string(), response);
        Ok(())
    }

    async fn delete_partition(&self, partition: &str) -> Result<bool, CacheError> {
        Ok(self.partitions.write().remove(partition).is_some())
    }

    async fn partition_names(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.partitions.read().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_partitions_are_separate() {
        let cache = InMemoryCacheStorage::new();
        cache
            .put("ccc-static-v1", "GET /x", FetchResponse::ok("static"))
            .await
            .unwrap();

        assert!(cache.get("ccc-api-v1", "GET /x").await.unwrap().is_none());
        assert_eq!(
            cache.get("ccc-static-v1", "GET /x").await.unwrap(),
            Some(FetchResponse::ok("static"))
        );
    }

    #[tokio::test]
    async fn test_open_and_delete() {
        let cache = InMemoryCacheStorage::new();
        cache.open("ccc-api-v1").await.unwrap();
        assert_eq!(
            cache.partition_names().await.unwrap(),
            vec!["ccc-api-v1".to_string()]
        );

        assert!(cache.delete_partition("ccc-api-v1").await.unwrap());
        assert!(!cache.delete_partition("ccc-api-v1").await.unwrap());
    }
}
