//! Cross-subsystem flows driven through `WorkerRuntime`.

pub mod durability;
pub mod flows;
