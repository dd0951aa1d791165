//! # Fetch Interceptor (cc-04)
//!
//! Request policy of the offline worker.
//!
//! | Request | Policy | Offline fallback |
//! |---------|--------|------------------|
//! | `GET /api/...` | Network first, cached copy on failure | `503 {"status":"offline",...}` |
//! | Other `/api/...` | Network only | `503 {"status":"offline",...}` |
//! | `GET` static asset | Cache first, network on miss | `/offline.html` for HTML requests |
//! | Other static | Network only | none |
//!
//! API responses and static assets live in two separate cache partitions,
//! each named with a generation tag (`ccc-api-v3`, `ccc-static-v3`).
//! `activate` drops every partition that is not current.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Request/response values, partition naming, offline fallbacks
//! - `ports/` - `CacheStorage` and `Network` (driven ports)
//! - `adapters/` - In-memory cache storage, reqwest network, scripted network
//! - `service/` - `FetchInterceptor`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{HttpNetwork, InMemoryCacheStorage, ScriptedNetwork};
pub use domain::errors::{CacheError, FetchError, NetworkError};
pub use domain::offline::{offline_api_response, OFFLINE_DOCUMENT_PATH, OFFLINE_MESSAGE};
pub use domain::partition::{CacheNames, CachePartition};
pub use domain::request::{FetchRequest, FetchResponse};
pub use ports::outbound::{CacheStorage, Network};
pub use service::{FetchInterceptor, InstallReport, InterceptorConfig};
