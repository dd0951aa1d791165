//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (local durable storage supplied by the host)

pub mod outbound;
