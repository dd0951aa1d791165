//! # Worker Configuration
//!
//! Plain structs with defaults, overridden from `CCC_*` environment
//! variables and checked by `WorkerConfig::validate`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Complete worker configuration.
#[derive(Debug, Clone, Default)]
pub struct WorkerConfig {
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub sync: SyncConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}'")]
    InvalidValue { var: String, value: String },

    #[error("API base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("API prefix must start and end with '/', got '{0}'")]
    InvalidApiPrefix(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Local durable storage.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// File name of the queue store inside `data_dir`.
    pub store_file: String,
    /// Attachments larger than this are refused at enqueue time.
    pub max_attachment_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            store_file: "offline-queue.db".to_string(),
            max_attachment_bytes: 25 * 1024 * 1024,
        }
    }
}

impl StorageConfig {
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file)
    }
}

/// Backend API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Path prefix that selects the network-first policy.
    pub api_prefix: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            api_prefix: "/api/".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 3,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Sync scheduler.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// How often registered sync tags are collected and replayed.
    pub interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Cache partitions and the precached shell.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Generation tag; bump on deploy to invalidate both partitions.
    pub version: u32,
    pub offline_document: String,
    pub precache_urls: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            version: 1,
            offline_document: "/offline.html".to_string(),
            precache_urls: vec![
                "/".to_string(),
                "/index.html".to_string(),
                "/offline.html".to_string(),
                "/manifest.json".to_string(),
            ],
        }
    }
}

impl WorkerConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden from an arbitrary variable source, then validated.
    ///
    /// - `CCC_DATA_DIR`
    /// - `CCC_API_BASE_URL`, `CCC_API_PREFIX`
    /// - `CCC_REQUEST_TIMEOUT_SECS`
    /// - `CCC_SYNC_INTERVAL_SECS`
    /// - `CCC_CACHE_VERSION`
    /// - `CCC_MAX_ATTACHMENT_BYTES`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("CCC_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("CCC_API_BASE_URL") {
            config.api.base_url = url;
        }
        if let Some(prefix) = lookup("CCC_API_PREFIX") {
            config.api.api_prefix = prefix;
        }
        if let Some(secs) = parse_var(&lookup, "CCC_REQUEST_TIMEOUT_SECS")? {
            config.api.request_timeout_secs = secs;
        }
        if let Some(secs) = parse_var(&lookup, "CCC_SYNC_INTERVAL_SECS")? {
            config.sync.interval_secs = secs;
        }
        if let Some(version) = parse_var(&lookup, "CCC_CACHE_VERSION")? {
            config.cache.version = version;
        }
        if let Some(max) = parse_var(&lookup, "CCC_MAX_ATTACHMENT_BYTES")? {
            config.storage.max_attachment_bytes = max;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.clone()));
        }
        let prefix = &self.api.api_prefix;
        if !(prefix.starts_with('/') && prefix.ends_with('/')) {
            return Err(ConfigError::InvalidApiPrefix(prefix.clone()));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("CCC_REQUEST_TIMEOUT_SECS"));
        }
        if self.sync.interval_secs == 0 {
            return Err(ConfigError::Zero("CCC_SYNC_INTERVAL_SECS"));
        }
        if self.storage.max_attachment_bytes == 0 {
            return Err(ConfigError::Zero("CCC_MAX_ATTACHMENT_BYTES"));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                value,
            }),
    }
}
