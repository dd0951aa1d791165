//! # Shared Types Crate
//!
//! Domain entities for the offline queue shared across the worker crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: queued record shapes are defined here and
//!   nowhere else.
//! - **Validate at the boundary**: `NewVote`/`NewSubmission` are checked when
//!   they are enqueued, so replay never has to second-guess a record's shape.
//! - **Injected time**: everything that stamps a record takes a `TimeSource`.

pub mod entities;
pub mod errors;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource};
