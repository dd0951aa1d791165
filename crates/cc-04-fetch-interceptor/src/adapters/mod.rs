//! # Adapters Module
//!
//! - `memory_cache`: `CacheStorage` kept in process memory
//! - `http`: reqwest `Network`
//! - `scripted`: canned `Network` for tests and demos

pub mod http;
pub mod memory_cache;
pub mod scripted;

pub use http::HttpNetwork;
pub use memory_cache::InMemoryCacheStorage;
pub use scripted::ScriptedNetwork;
