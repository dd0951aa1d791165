//! # Fetch Interceptor Service

use crate::domain::errors::{FetchError, NetworkError};
use crate::domain::offline::{offline_api_response, OFFLINE_DOCUMENT_PATH};
use crate::domain::partition::{CacheNames, CachePartition};
use crate::domain::request::{FetchRequest, FetchResponse};
use crate::ports::outbound::{CacheStorage, Network};
use std::sync::Arc;
use tracing::{debug, info, warn};


pub const DEFAULT_API_PREFIX: &str = "/api/";
pub const DEFAULT_CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone)]
pub struct InterceptorConfig {
    /// Paths under this prefix get the API policy.
    pub api_prefix: String,
    /// Generation tag of the current partitions.
    pub cache_version: u32,
    /// Static-partition page served to HTML requests while offline.
    pub offline_document: String,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            cache_version: DEFAULT_CACHE_VERSION,
            offline_document: OFFLINE_DOCUMENT_PATH.to_string(),
        }
    }
}

/// Result of precaching the static shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub cached: Vec<String>,
    /// `(url, reason)` for every URL that could not be cached.
    pub failed: Vec<(String, String)>,
}

impl InstallReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct FetchInterceptor {
    config: InterceptorConfig,
    names: CacheNames,
    cache: Arc<dyn CacheStorage>,
    network: Arc<dyn Network>,
}

impl FetchInterceptor {
    pub fn new(
        config: InterceptorConfig,
        cache: Arc<dyn CacheStorage>,
        network: Arc<dyn Network>,
    ) -> Self {
        let names = CacheNames::new(config.cache_version);
        Self {
            config,
            names,
            cache,
            network,
        }
    }

    pub fn cache_names(&self) -> &CacheNames {
        &self.names
    }

    pub fn is_api_request(&self, request: &FetchRequest) -> bool {
        request.path().starts_with(&self.config.api_prefix)
    }

    /// Answer an intercepted request.
    ///
    /// API requests always resolve; only a static request with neither a
    /// cached copy nor an offline page can fail.
    pub async fn handle(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        if self.is_api_request(request) {
            return Ok(self.network_first(request).await);
        }
        if !request.is_get() {
            return Ok(self.network.fetch(request).await?);
        }
        self.cache_first(request).await
    }

    async fn network_first(&self, request: &FetchRequest) -> FetchResponse {
        let error = match self.network.fetch(request).await {
            Ok(response) => {
                if request.is_get() && response.is_success() {
                    self.store(CachePartition::Api, request, &response).await;
                }
                return response;
            }
            Err(e) => e,
        };

        if request.is_get() {
            if let Some(cached) = self.lookup(CachePartition::Api, &request.cache_key()).await {
                debug!(url = %request.url, "[cc-04] Serving cached API response");
                return cached;
            }
        }

        info!(url = %request.url, error = %error, "[cc-04] API unreachable, answering offline");
        offline_api_response()
    }

    async fn cache_first(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        if let Some(cached) = self
            .lookup(CachePartition::Static, &request.cache_key())
            .await
        {
            return Ok(cached);
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_success() {
                    self.store(CachePartition::Static, request, &response).await;
                }
                Ok(response)
            }
            Err(e) => self.offline_fallback(request, e).await,
        }
    }

    async fn offline_fallback(
        &self,
        request: &FetchRequest,
        error: NetworkError,
    ) -> Result<FetchResponse, FetchError> {
        if request.accepts_html() {
            let key = FetchRequest::get(&self.config.offline_document).cache_key();
            if let Some(page) = self.lookup(CachePartition::Static, &key).await {
                info!(url = %request.url, "[cc-04] Serving offline document");
                return Ok(page);
            }
            warn!("[cc-04] Offline document missing from static cache");
        }
        Err(FetchError::Network(error))
    }

    async fn lookup(&self, partition: CachePartition, key: &str) -> Option<FetchResponse> {
        let name = self.names.name(partition);
        match self.cache.get(name, key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(partition = name, error = %e, "[cc-04] Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn store(
        &self,
        partition: CachePartition,
        request: &FetchRequest,
        response: &FetchResponse,
    ) {
        let name = self.names.name(partition);
        if let Err(e) = self
            .cache
            .put(name, &request.cache_key(), response.clone())
            .await
        {
            warn!(partition = name, error = %e, "[cc-04] Cache write failed");
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Precache the static shell into the current static partition.
    pub async fn install(&self, precache_urls: &[String]) -> InstallReport {
        let name = self.names.name(CachePartition::Static);
        let mut report = InstallReport::default();

        if let Err(e) = self.cache.open(name).await {
            warn!(partition = name, error = %e, "[cc-04] Cannot open static partition");
            report.failed = precache_urls
                .iter()
                .map(|url| (url.clone(), e.to_string()))
                .collect();
            return report;
        }

        for url in precache_urls {
            let request = FetchRequest::get(url.as_str());
            match self.network.fetch(&request).await {
                Ok(response) if response.is_success() => {
                    self.store(CachePartition::Static, &request, &response).await;
                    report.cached.push(url.clone());
                }
                Ok(response) => {
                    warn!(url = %url, status = response.status, "[cc-04] Precache rejected");
                    report
                        .failed
                        .push((url.clone(), format!("status {}", response.status)));
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "[cc-04] Precache failed");
                    report.failed.push((url.clone(), e.to_string()));
                }
            }
        }

        info!(
            partition = name,
            cached = report.cached.len(),
            failed = report.failed.len(),
            "[cc-04] Static shell installed"
        );
        report
    }

    /// Drop every partition that is not part of the current generation.
    /// Returns the deleted names.
    pub async fn activate(&self) -> Vec<String> {
        let names = match self.cache.partition_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "[cc-04] Cannot list cache partitions");
                return Vec::new();
            }
        };

        let mut deleted = Vec::new();
        for name in names.into_iter().filter(|n| !self.names.is_current(n)) {
            match self.cache.delete_partition(&name).await {
                Ok(true) => {
                    info!(partition = %name, "[cc-04] Stale cache partition deleted");
                    deleted.push(name);
                }
                Ok(false) => {}
                Err(e) => warn!(partition = %name, error = %e, "[cc-04] Cannot delete partition"),
            }
        }
        deleted
    }
}
