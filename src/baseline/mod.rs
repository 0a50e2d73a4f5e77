// src/baseline/mod.rs

//! Reference executors the pool scheduler is compared against.

pub mod serial;
pub mod spawn;

pub use serial::SerialExecutor;
pub use spawn::SpawnExecutor;
