//! # Worker Runtime
//!
//! In-process host: owns the container, plays the role of the platform's
//! background sync by collecting registered tags and firing `Sync` events
//! on a fixed interval, and stops on a watch-channel signal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use cc_01_queue_store::{FileStoreOpener, StoreOpener};
use cc_02_background_sync::{HttpDeliveryClient, HttpDeliveryConfig, PendingSyncRegistry, SyncReport};
use cc_04_fetch_interceptor::HttpNetwork;
use parking_lot::Mutex;
use shared_types::QueueKind;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::container::{HostCapabilities, WorkerConfig, WorkerContainer};
use crate::handlers::{EventDispatcher, HostEvent, HostOutcome, OfflineActions};

/// Grace period for the scheduler to finish an in-flight pass.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

pub struct WorkerRuntime<O: StoreOpener + Clone> {
    container: Arc<WorkerContainer<O>>,
    dispatcher: Arc<EventDispatcher<O>>,
    sync_registry: Arc<PendingSyncRegistry>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    scheduler: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerRuntime<Arc<FileStoreOpener>> {
    /// Runtime against the file-backed store and the HTTP backend.
    pub fn production(config: WorkerConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.storage.data_dir).with_context(|| {
            format!(
                "Failed to create data directory {}",
                config.storage.data_dir.display()
            )
        })?;

        let opener = Arc::new(FileStoreOpener::new(config.storage.store_path()));
        let delivery = HttpDeliveryClient::new(HttpDeliveryConfig {
            base_url: config.api.base_url.clone(),
            request_timeout: config.api.request_timeout(),
            connect_timeout: config.api.connect_timeout(),
            ..HttpDeliveryConfig::default()
        })
        .context("Failed to build delivery client")?;
        let network = HttpNetwork::new(
            config.api.base_url.clone(),
            config.api.request_timeout(),
            config.api.connect_timeout(),
        )
        .context("Failed to build network client")?;

        info!(
            store = %config.storage.store_path().display(),
            backend = %config.api.base_url,
            "[runtime] Production adapters ready"
        );

        let host = HostCapabilities::in_process(opener, Arc::new(delivery), Arc::new(network));
        Ok(Self::new(config, host))
    }
}

impl<O: StoreOpener + Clone + 'static> WorkerRuntime<O> {
    /// Background sync registrations made by the container land in a
    /// registry the runtime drains, whatever `host.background_sync` held.
    pub fn new(config: WorkerConfig, mut host: HostCapabilities<O>) -> Self {
        let sync_registry = Arc::new(PendingSyncRegistry::new());
        host.background_sync = sync_registry.clone();

        let container = Arc::new(WorkerContainer::new(config, host));
        let dispatcher = Arc::new(EventDispatcher::new(Arc::clone(&container)));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            container,
            dispatcher,
            sync_registry,
            shutdown_tx,
            shutdown_rx,
            scheduler: Mutex::new(None),
        }
    }

    pub fn container(&self) -> Arc<WorkerContainer<O>> {
        Arc::clone(&self.container)
    }

    pub fn actions(&self) -> OfflineActions<O> {
        OfflineActions::new(Arc::clone(&self.container))
    }

    pub fn sync_registry(&self) -> &Arc<PendingSyncRegistry> {
        &self.sync_registry
    }

    pub async fn dispatch(&self, event: HostEvent) -> HostOutcome {
        self.dispatcher.handle(event).await
    }

    /// Fire a `Sync` event for every registered tag. Tags whose pass left
    /// records behind are registered again for the next pass.
    pub async fn run_sync_pass(&self) -> Vec<SyncReport> {
        sync_pass(&self.dispatcher, &self.container, &self.sync_registry).await
    }

    /// Register a sync tag for every queue that still holds records, so
    /// work left by a previous process is picked up by the scheduler.
    pub async fn restore_registrations(&self) -> usize {
        restore_registrations(&self.container).await
    }

    /// Start the sync scheduler. Calling it twice is a no-op.
    pub fn start(&self) {
        let mut slot = self.scheduler.lock();
        if slot.is_some() {
            debug!("[runtime] Scheduler already running");
            return;
        }

        let dispatcher = Arc::clone(&self.dispatcher);
        let container = Arc::clone(&self.container);
        let registry = Arc::clone(&self.sync_registry);
        let period = self.container.config.sync.interval();
        let mut shutdown = self.shutdown_rx.clone();

        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            restore_registrations(&container).await;
            info!(interval_secs = period.as_secs(), "[runtime] Sync scheduler started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        sync_pass(&dispatcher, &container, &registry).await;
                    }
                    _ = shutdown.changed() => {
                        info!("[runtime] Shutdown signal received");
                        break;
                    }
                }
            }
        }));
    }

    pub async fn shutdown(&self) {
        info!("[runtime] Initiating graceful shutdown");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("[runtime] Failed to send shutdown signal: {}", e);
        }

        let handle = self.scheduler.lock().take();
        if let Some(handle) = handle {
            match tokio::time::timeout(SHUTDOWN_GRACE, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("[runtime] Scheduler task failed: {}", e),
                Err(_) => warn!("[runtime] Scheduler did not stop within grace period"),
            }
        }

        info!("[runtime] Shutdown complete");
    }
}

async fn restore_registrations<O: StoreOpener + Clone + 'static>(
    container: &WorkerContainer<O>,
) -> usize {
    let mut restored = 0;
    for kind in QueueKind::ALL {
        let pending = container.queue_store.pending_count(kind);
        if pending > 0 && container.registrar.register_queue(kind).await {
            info!(queue = %kind, pending, "[runtime] Restored sync registration");
            restored += 1;
        }
    }
    restored
}

async fn sync_pass<O: StoreOpener + Clone + 'static>(
    dispatcher: &EventDispatcher<O>,
    container: &WorkerContainer<O>,
    registry: &PendingSyncRegistry,
) -> Vec<SyncReport> {
    let mut reports = Vec::new();

    for tag in registry.take_pending() {
        let outcome = dispatcher.handle(HostEvent::Sync { tag: tag.clone() }).await;
        if let HostOutcome::Synced(report) = outcome {
            if !report.is_success() {
                debug!(tag = %tag, failed = report.failed, "[runtime] Retrying on next pass");
                container.registrar.register_sync(&tag).await;
            }
            reports.push(report);
        }
    }

    reports
}
