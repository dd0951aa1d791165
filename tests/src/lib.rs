//! # CreativeCrowdChallenge Offline Worker Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # Submit, sync, badge and fetch flows through the runtime
//!     └── durability.rs   # Queue and badge state across worker restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ccc-tests
//! cargo test -p ccc-tests integration::durability
//! ```

#![allow(dead_code)]

pub mod integration;
