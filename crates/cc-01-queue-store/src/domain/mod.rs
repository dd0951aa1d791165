//! # Domain Layer
//!
//! - `keys` - Key layout inside the local store
//! - `value_objects` - Configuration
//! - `errors` - Domain error types

pub mod errors;
pub mod keys;
pub mod value_objects;
