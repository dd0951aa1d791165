//! # Worker Runtime Library
//!
//! The offline worker for CreativeCrowdChallenge as an in-process host.
//! The binary in `main.rs` is a thin shell around `WorkerRuntime`.
//!
//! ## Modules
//!
//! - `container/` - Configuration and subsystem wiring
//! - `adapters/` - Host capabilities owned by the runtime (connectivity, notifications)
//! - `handlers/` - Host event dispatch and the offline submission facade
//! - `runtime` - Sync scheduler and lifecycle
//!
//! ## Event Flow
//!
//! ```text
//! view ──submit──→ OfflineActions ──enqueue──→ Queue Store (cc-01)
//!                        │                          │
//!                        ├── online ──→ Replayer (cc-02) ──→ backend
//!                        └── pending ──→ Registrar (cc-02) ──→ sync tag
//!                                                   │
//! scheduler tick ──Sync{tag}──→ EventDispatcher ────┘
//! push ──→ notification + Badge Counter (cc-03)
//! fetch ──→ Fetch Interceptor (cc-04)
//! ```

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod handlers;
pub mod runtime;

pub use container::{ConfigError, HostCapabilities, WorkerConfig, WorkerContainer};
pub use handlers::{EventDispatcher, HostEvent, HostOutcome, OfflineActions, SubmitOutcome, ViewCommand};
pub use runtime::WorkerRuntime;
