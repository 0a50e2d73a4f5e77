// src/graph/mod.rs

//! Task records and dependency tracking.

pub mod bulk_task;
pub mod dep_graph;

pub use bulk_task::{BulkTask, UnitFailure, WorkUnit};
pub use dep_graph::DependencyGraph;
