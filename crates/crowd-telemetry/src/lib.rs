//! # Crowd Telemetry
//!
//! Log output for the offline worker.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crowd_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CCC_SERVICE_NAME` | `ccc-offline-worker` | Service name on every log line |
//! | `CCC_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directive |
//! | `CCC_JSON_LOGS` | `false` (`true` in containers) | JSON instead of pretty output |
//! | `CCC_CONSOLE_OUTPUT` | `true` | Disable to silence stdout entirely |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),
}
