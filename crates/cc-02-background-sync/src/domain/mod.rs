//! # Domain Layer
//!
//! - `errors` - Delivery and host capability errors
//! - `report` - Outcome of one replay pass

pub mod errors;
pub mod report;
