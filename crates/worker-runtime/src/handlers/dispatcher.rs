use std::sync::Arc;

use cc_01_queue_store::StoreOpener;
use cc_02_background_sync::SyncReplayApi;
use shared_types::QueueKind;
use tracing::{debug, info, warn};

use crate::adapters::Notification;
use crate::container::WorkerContainer;
use crate::handlers::events::{HostEvent, HostOutcome, ViewCommand};

/// Routes host events to the owning subsystem.
///
/// Every branch ends in an outcome; failures are logged, never raised to
/// the host.
pub struct EventDispatcher<O: StoreOpener + Clone> {
    container: Arc<WorkerContainer<O>>,
}

impl<O: StoreOpener + Clone + 'static> EventDispatcher<O> {
    pub fn new(container: Arc<WorkerContainer<O>>) -> Self {
        Self { container }
    }

    pub async fn handle(&self, event: HostEvent) -> HostOutcome {
        match event {
            HostEvent::Install => {
                let report = self
                    .container
                    .interceptor
                    .install(&self.container.config.cache.precache_urls)
                    .await;
                HostOutcome::Installed(report)
            }
            HostEvent::Activate => HostOutcome::Activated {
                deleted: self.container.interceptor.activate().await,
            },
            HostEvent::Sync { tag } => self.on_sync(&tag).await,
            HostEvent::Push { payload } => self.on_push(payload.as_deref()).await,
            HostEvent::NotificationClick { url } => self.on_notification_click(url).await,
            HostEvent::Fetch(request) => match self.container.interceptor.handle(&request).await {
                Ok(response) => HostOutcome::Response(response),
                Err(e) => {
                    debug!(url = %request.url, error = %e, "[runtime] Fetch failed");
                    HostOutcome::FetchFailed(e)
                }
            },
            HostEvent::Message(command) => self.on_message(command).await,
        }
    }

    async fn on_sync(&self, tag: &str) -> HostOutcome {
        match QueueKind::from_sync_tag(tag) {
            Some(kind) => {
                HostOutcome::Synced(self.container.replayer.replay_with_report(kind).await)
            }
            None => {
                warn!(tag, "[runtime] Unknown sync tag ignored");
                HostOutcome::Ignored
            }
        }
    }

    async fn on_push(&self, payload: Option<&[u8]>) -> HostOutcome {
        let notification = Notification::from_push_payload(payload);
        if let Err(e) = self.container.notifications.show(&notification).await {
            warn!(error = %e, "[runtime] Notification not shown");
        }

        let badge = match self.container.badge.adjust(1).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(error = %e, "[runtime] Badge not incremented");
                None
            }
        };
        HostOutcome::NotificationShown { badge }
    }

    async fn on_notification_click(&self, url: Option<String>) -> HostOutcome {
        if let Err(e) = self.container.badge.adjust(-1).await {
            warn!(error = %e, "[runtime] Badge not decremented");
        }
        HostOutcome::FocusView {
            url: url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| "/".to_string()),
        }
    }

    async fn on_message(&self, command: ViewCommand) -> HostOutcome {
        match command {
            ViewCommand::SkipWaiting => {
                info!("[runtime] View requested immediate activation");
                HostOutcome::SkipWaiting
            }
            ViewCommand::GetBadgeCount => {
                HostOutcome::BadgeCount(self.container.badge.announce().await)
            }
            ViewCommand::ClearBadge => {
                if let Err(e) = self.container.badge.clear().await {
                    warn!(error = %e, "[runtime] Badge not cleared");
                }
                HostOutcome::BadgeCount(self.container.badge.current().await)
            }
            ViewCommand::SyncNow { queue } => {
                HostOutcome::Synced(self.container.replayer.replay_with_report(queue).await)
            }
        }
    }
}
