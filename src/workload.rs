// src/workload.rs

//! Turning a validated workload file into executable bulk tasks.
//!
//! Each `[task.<name>]` becomes one bulk task whose units sleep for the
//! configured `unit_millis`, standing in for real per-index work. Tasks
//! are submitted in the workload's precomputed order, so every `after`
//! name already has an id by the time its dependents are submitted.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::baseline::{SerialExecutor, SpawnExecutor};
use crate::config::model::{TaskSpec, WorkloadFile};
use crate::errors::Result;
use crate::executor::Executor;
use crate::scheduler::Scheduler;
use crate::types::{ExecutorKind, TaskId, WaitStrategy, Work};

/// Timing summary from one workload execution.
#[derive(Debug, Clone)]
pub struct WorkloadReport {
    pub executor: &'static str,
    pub tasks: usize,
    pub units: usize,
    pub elapsed: Duration,
}

/// Build the executor selected by `kind`.
///
/// `wait` only matters for [`ExecutorKind::Pool`]; the `spin` kind is the
/// pool pinned to the busy-wait strategy.
pub fn make_executor(
    kind: ExecutorKind,
    workers: usize,
    wait: WaitStrategy,
) -> Result<Box<dyn Executor>> {
    Ok(match kind {
        ExecutorKind::Serial => Box::new(SerialExecutor::new()),
        ExecutorKind::Spawn => Box::new(SpawnExecutor::new(workers)?),
        ExecutorKind::Spin => Box::new(Scheduler::with_wait_strategy(
            workers,
            WaitStrategy::Spin,
        )?),
        ExecutorKind::Pool => Box::new(Scheduler::with_wait_strategy(workers, wait)?),
    })
}

/// Submit every task in the workload to `executor`, wait for the final
/// barrier, and report how long the whole thing took.
pub fn execute_workload(
    executor: &mut dyn Executor,
    workload: &WorkloadFile,
) -> Result<WorkloadReport> {
    let start = Instant::now();
    let mut ids: HashMap<&str, TaskId> = HashMap::new();
    let mut units = 0;

    for (name, spec) in workload.ordered_tasks() {
        let mut deps = Vec::with_capacity(spec.after.len());
        for dep in &spec.after {
            match ids.get(dep.as_str()) {
                Some(id) => deps.push(*id),
                None => warn!(task = name, dep = %dep, "dependency submitted out of order"),
            }
        }
        let id = executor.submit_async(unit_work(spec), spec.units, &deps)?;
        debug!(task = name, id, units = spec.units, "workload task submitted");
        ids.insert(name, id);
        units += spec.units;
    }

    executor.sync()?;

    let elapsed = start.elapsed();
    info!(
        executor = executor.name(),
        tasks = ids.len(),
        units,
        ?elapsed,
        "workload complete"
    );
    Ok(WorkloadReport {
        executor: executor.name(),
        tasks: ids.len(),
        units,
        elapsed,
    })
}

fn unit_work(spec: &TaskSpec) -> Work {
    let pause = Duration::from_millis(spec.unit_millis);
    Arc::new(move |_index, _total| {
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    })
}
