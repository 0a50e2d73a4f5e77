// src/config/mod.rs

//! Workload loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a workload file from disk (`loader.rs`).
//! - Validate invariants like dependency resolution and acyclicity
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_workload_path, load_and_validate, load_from_path};
pub use model::{GlobalSection, RawWorkloadFile, TaskSpec, WorkloadFile};
