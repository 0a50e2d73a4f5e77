// src/errors.rs

//! Crate-wide error type and helpers.

use thiserror::Error;

use crate::types::TaskId;

#[derive(Error, Debug)]
pub enum SchedulerError {
    /// A synchronously rejected argument (zero units, zero workers).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A submission named a dependency id that was never issued by this
    /// scheduler. Rejected at submission time; the alternative is a barrier
    /// that waits forever on an edge nothing can ever resolve.
    #[error("Unknown dependency: task id {0} was never issued")]
    UnknownDependency(TaskId),

    /// A work callback panicked inside the pool. The barrier still ran to
    /// completion; this carries the first captured failure.
    #[error("work callback for task {task} panicked at unit {index}: {message}")]
    UnitPanic {
        task: TaskId,
        index: usize,
        message: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cycle detected in workload DAG: {0}")]
    DagCycle(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SchedulerError>;
