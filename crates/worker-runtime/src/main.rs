//! # CreativeCrowdChallenge Offline Worker
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging from `CCC_LOG_LEVEL` / `CCC_JSON_LOGS`
//! 2. Load and validate `WorkerConfig` from the environment
//! 3. Wire subsystems against the file store and the HTTP backend
//! 4. Install (precache the shell) and activate (purge old caches)
//! 5. Run the sync scheduler until Ctrl+C

use anyhow::{Context, Result};
use crowd_telemetry::{init_logging, TelemetryConfig};
use tracing::{info, warn};
use worker_runtime::{HostEvent, HostOutcome, WorkerConfig, WorkerRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_logging(&telemetry).context("Failed to initialize logging")?;

    let config = WorkerConfig::from_env().context("Invalid worker configuration")?;
    let runtime = WorkerRuntime::production(config)?;

    match runtime.dispatch(HostEvent::Install).await {
        HostOutcome::Installed(report) if report.is_complete() => {
            info!(cached = report.cached.len(), "[runtime] Installed");
        }
        HostOutcome::Installed(report) => {
            warn!(
                cached = report.cached.len(),
                failed = report.failed.len(),
                "[runtime] Installed with missing shell resources"
            );
        }
        other => warn!(?other, "[runtime] Unexpected install outcome"),
    }
    if let HostOutcome::Activated { deleted } = runtime.dispatch(HostEvent::Activate).await {
        info!(deleted = deleted.len(), "[runtime] Activated");
    }

    runtime.start();

    info!("Worker is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
