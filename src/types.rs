use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

/// Identifier of a submitted bulk task.
///
/// Ids are issued strictly increasing from 0 for the lifetime of a scheduler
/// and are never reused, so an id is enough to name a dependency even after
/// the task itself has long finished.
pub type TaskId = u64;

/// The work callback: invoked exactly once for every index in
/// `[0, total_units)` as `work(index, total)`.
///
/// Order across indices is unspecified and possibly concurrent; the callback
/// owns any cross-index synchronization it needs.
pub type WorkFn = dyn Fn(usize, usize) + Send + Sync;

/// Shared handle to a work callback.
pub type Work = Arc<WorkFn>;

/// Outcome of a finished bulk task, as recorded in the completed-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// At least one unit's callback panicked. The task still counts as
    /// completed for dependency resolution.
    Failed,
}

/// How an idle worker waits for the ready queue to fill.
///
/// - `Sleep`: block on a condvar until woken by an enqueue or shutdown
///   (default behaviour).
/// - `Spin`: poll the queue in a spin loop. Trades a core's worth of CPU for
///   lower wake latency; useful only as a performance baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitStrategy {
    Sleep,
    Spin,
}

impl Default for WaitStrategy {
    fn default() -> Self {
        WaitStrategy::Sleep
    }
}

impl FromStr for WaitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sleep" => Ok(WaitStrategy::Sleep),
            "spin" => Ok(WaitStrategy::Spin),
            other => Err(format!(
                "invalid wait strategy: {other} (expected \"sleep\" or \"spin\")"
            )),
        }
    }
}

/// Which execution strategy a workload should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorKind {
    /// Every unit inline on the calling thread.
    Serial,
    /// Fresh threads per `run` call, joined before returning.
    Spawn,
    /// The thread-pool scheduler with busy-spin workers.
    Spin,
    /// The thread-pool scheduler with sleeping workers (default).
    Pool,
}

impl Default for ExecutorKind {
    fn default() -> Self {
        ExecutorKind::Pool
    }
}

impl FromStr for ExecutorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serial" => Ok(ExecutorKind::Serial),
            "spawn" => Ok(ExecutorKind::Spawn),
            "spin" => Ok(ExecutorKind::Spin),
            "pool" => Ok(ExecutorKind::Pool),
            other => Err(format!(
                "invalid executor kind: {other} (expected \"serial\", \"spawn\", \"spin\" or \"pool\")"
            )),
        }
    }
}
