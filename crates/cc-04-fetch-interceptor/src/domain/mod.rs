//! # Domain Layer
//!
//! - `request` - `FetchRequest`, `FetchResponse`
//! - `partition` - Cache partitions and generation names
//! - `offline` - Synthesised offline answers
//! - `errors` - Cache, network and fetch errors

pub mod errors;
pub mod offline;
pub mod partition;
pub mod request;
