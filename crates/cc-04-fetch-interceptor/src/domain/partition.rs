use std::fmt;

pub const STATIC_PARTITION_PREFIX: &str = "ccc-static-v";
pub const API_PARTITION_PREFIX: &str = "ccc-api-v";

/// The two strictly separated cache partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePartition {
    /// App shell: HTML, scripts, styles, images, the offline document.
    Static,
    /// Last successful answers from the API namespace.
    Api,
}

impl fmt::Display for CachePartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachePartition::Static => write!(f, "static"),
            CachePartition::Api => write!(f, "api"),
        }
    }
}

/// Partition names for one cache generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheNames {
    static_name: String,
    api_name: String,
}

impl CacheNames {
    pub fn new(version: u32) -> Self {
        Self {
            static_name: format!("{}{}", STATIC_PARTITION_PREFIX, version),
            api_name: format!("{}{}", API_PARTITION_PREFIX, version),
        }
    }

    pub fn name(&self, partition: CachePartition) -> &str {
        match partition {
            CachePartition::Static => &self.static_name,
            CachePartition::Api => &self.api_name,
        }
    }

    pub fn is_current(&self, name: &str) -> bool {
        name == self.static_name || name == self.api_name
    }
}
