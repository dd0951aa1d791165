//! # Subsystem Container
//!
//! ```text
//! Level 0: Queue Store (cc-01)      durable store, shared with the badge
//! Level 1: Registrar, Replayer (cc-02), Badge Counter (cc-03)
//! Level 2: Fetch Interceptor (cc-04) independent of the store
//! ```
//!
//! The queue store and the badge counter open the same local store through
//! one cloned `StoreOpener`.

use std::sync::Arc;

use cc_01_queue_store::{QueueStore, QueueStoreConfig, StoreOpener};
use cc_02_background_sync::{
    BackgroundSyncRegistrar, DeliveryClient, PendingSyncRegistry, SyncCapability, SyncReplayer,
};
use cc_03_badge_counter::{BadgeCounter, BadgeDisplay, NoBadgeDisplay};
use cc_04_fetch_interceptor::{
    CacheStorage, FetchInterceptor, InMemoryCacheStorage, InterceptorConfig, Network,
};
use shared_bus::{InMemoryViewRegistry, ViewRegistry};
use shared_types::SystemTimeSource;
use tracing::info;

use crate::adapters::{
    Connectivity, LoggingNotificationPresenter, NotificationPresenter, StaticConnectivity,
};
use crate::container::config::WorkerConfig;

/// Everything the host platform provides.
pub struct HostCapabilities<O> {
    pub opener: O,
    pub delivery: Arc<dyn DeliveryClient>,
    pub background_sync: Arc<dyn SyncCapability>,
    pub views: Arc<dyn ViewRegistry>,
    pub badge_display: Arc<dyn BadgeDisplay>,
    pub notifications: Arc<dyn NotificationPresenter>,
    pub cache: Arc<dyn CacheStorage>,
    pub network: Arc<dyn Network>,
    pub connectivity: Arc<dyn Connectivity>,
}

impl<O> HostCapabilities<O> {
    /// In-process host defaults around the three adapters that vary.
    pub fn in_process(
        opener: O,
        delivery: Arc<dyn DeliveryClient>,
        network: Arc<dyn Network>,
    ) -> Self {
        Self {
            opener,
            delivery,
            background_sync: Arc::new(PendingSyncRegistry::new()),
            views: Arc::new(InMemoryViewRegistry::new()),
            badge_display: Arc::new(NoBadgeDisplay),
            notifications: Arc::new(LoggingNotificationPresenter),
            cache: Arc::new(InMemoryCacheStorage::new()),
            network,
            connectivity: Arc::new(StaticConnectivity::online()),
        }
    }
}

/// Central container holding all subsystem instances.
pub struct WorkerContainer<O: StoreOpener + Clone> {
    pub config: WorkerConfig,

    // =========================================================================
    // LEVEL 0
    // =========================================================================
    /// Persistent Queue Store (cc-01)
    pub queue_store: Arc<QueueStore<O>>,

    // =========================================================================
    // LEVEL 1: Depends on the store
    // =========================================================================
    /// Background Sync Registrar (cc-02)
    pub registrar: Arc<BackgroundSyncRegistrar>,

    /// Sync Replayer (cc-02)
    pub replayer: Arc<SyncReplayer<O>>,

    /// Badge Counter (cc-03)
    pub badge: Arc<BadgeCounter<O>>,

    // =========================================================================
    // LEVEL 2
    // =========================================================================
    /// Fetch Interceptor (cc-04)
    pub interceptor: Arc<FetchInterceptor>,

    // =========================================================================
    // SHARED HOST CAPABILITIES
    // =========================================================================
    pub views: Arc<dyn ViewRegistry>,
    pub notifications: Arc<dyn NotificationPresenter>,
    pub connectivity: Arc<dyn Connectivity>,
}

impl<O: StoreOpener + Clone> WorkerContainer<O> {
    pub fn new(config: WorkerConfig, host: HostCapabilities<O>) -> Self {
        info!("[runtime] Wiring subsystems");

        let queue_store = Arc::new(QueueStore::with_parts(
            host.opener.clone(),
            SystemTimeSource,
            QueueStoreConfig {
                max_attachment_bytes: config.storage.max_attachment_bytes,
            },
        ));

        let registrar = Arc::new(BackgroundSyncRegistrar::new(host.background_sync));
        let replayer = Arc::new(SyncReplayer::new(
            Arc::clone(&queue_store),
            host.delivery,
            Arc::clone(&host.views),
        ));
        let badge = Arc::new(BadgeCounter::new(
            host.opener,
            Arc::clone(&host.views),
            host.badge_display,
        ));

        let interceptor = Arc::new(FetchInterceptor::new(
            InterceptorConfig {
                api_prefix: config.api.api_prefix.clone(),
                cache_version: config.cache.version,
                offline_document: config.cache.offline_document.clone(),
            },
            host.cache,
            host.network,
        ));

        Self {
            config,
            queue_store,
            registrar,
            replayer,
            badge,
            interceptor,
            views: host.views,
            notifications: host.notifications,
            connectivity: host.connectivity,
        }
    }
}
