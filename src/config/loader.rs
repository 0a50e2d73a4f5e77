// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{RawWorkloadFile, WorkloadFile};
use crate::errors::Result;

/// Load a workload file from a given path and return the raw
/// `RawWorkloadFile`.
///
/// This only performs TOML deserialization; it does **not** perform
/// semantic validation (dependency resolution, cycle detection, etc.).
/// Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawWorkloadFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let workload: RawWorkloadFile = toml::from_str(&contents)?;

    Ok(workload)
}

/// Load a workload file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - unknown or self-referential `after` references,
///   - dependency cycles,
///   - zero unit counts and basic global config sanity.
///
/// The returned [`WorkloadFile`] carries a precomputed submission order in
/// which every dependency precedes its dependents.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<WorkloadFile> {
    let raw_workload = load_from_path(&path)?;
    let workload = WorkloadFile::try_from(raw_workload)?;
    Ok(workload)
}

/// Helper to resolve a default workload path.
///
/// Currently this just returns `Dagpool.toml` in the current working
/// directory; it exists so discovery can later grow (env var override,
/// multiple default locations) without touching call sites.
pub fn default_workload_path() -> PathBuf {
    PathBuf::from("Dagpool.toml")
}
