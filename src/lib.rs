// src/lib.rs

pub mod baseline;
pub mod cli;
pub mod config;
pub mod errors;
pub mod executor;
pub mod graph;
pub mod logging;
pub mod pool;
pub mod scheduler;
pub mod types;
pub mod workload;

use std::path::PathBuf;

use tracing::debug;

use crate::cli::{CliArgs, ExecutorArg};
use crate::config::loader::load_and_validate;
use crate::config::model::WorkloadFile;
use crate::workload::{execute_workload, make_executor, WorkloadReport};

pub use crate::baseline::{SerialExecutor, SpawnExecutor};
pub use crate::errors::{Result, SchedulerError};
pub use crate::executor::Executor;
pub use crate::scheduler::Scheduler;
pub use crate::types::{ExecutorKind, TaskId, TaskOutcome, WaitStrategy, Work};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - workload loading
/// - executor construction
/// - submission + final sync
/// - timing report output
pub fn run(args: CliArgs) -> Result<()> {
    let workload_path = PathBuf::from(&args.workload);
    let workload = load_and_validate(&workload_path)?;

    if args.dry_run {
        print_dry_run(&workload);
        return Ok(());
    }

    let workers = args.workers.unwrap_or(workload.config().workers);
    let wait = workload.config().wait;

    if args.compare {
        return run_comparison(&workload, workers, wait);
    }

    let kind = match args.executor {
        Some(arg) => executor_kind_from_arg(arg),
        None => workload.config().executor,
    };
    let mut executor = make_executor(kind, workers, wait)?;
    let report = execute_workload(executor.as_mut(), &workload)?;
    print_report(&report);
    Ok(())
}

/// Run the same workload on every executor, slowest baseline first, and
/// print one timing line per run.
fn run_comparison(workload: &WorkloadFile, workers: usize, wait: WaitStrategy) -> Result<()> {
    for kind in [
        ExecutorKind::Serial,
        ExecutorKind::Spawn,
        ExecutorKind::Spin,
        ExecutorKind::Pool,
    ] {
        let mut executor = make_executor(kind, workers, wait)?;
        let report = execute_workload(executor.as_mut(), workload)?;
        print_report(&report);
    }
    Ok(())
}

fn executor_kind_from_arg(arg: ExecutorArg) -> ExecutorKind {
    match arg {
        ExecutorArg::Serial => ExecutorKind::Serial,
        ExecutorArg::Spawn => ExecutorKind::Spawn,
        ExecutorArg::Spin => ExecutorKind::Spin,
        ExecutorArg::Pool => ExecutorKind::Pool,
    }
}

fn print_report(report: &WorkloadReport) {
    println!(
        "[{}] {} tasks / {} units in {:.2?}",
        report.executor, report.tasks, report.units, report.elapsed
    );
}

/// Simple dry-run output: print settings, tasks and dependencies.
fn print_dry_run(workload: &WorkloadFile) {
    println!("dagpool dry-run");
    println!("  config.workers = {}", workload.config().workers);
    println!("  config.wait = {:?}", workload.config().wait);
    println!("  config.executor = {:?}", workload.config().executor);
    println!();

    println!("tasks ({}):", workload.tasks().len());
    for (name, spec) in workload.ordered_tasks() {
        println!("  - {name}");
        println!("      units: {}", spec.units);
        println!("      unit_millis: {}", spec.unit_millis);
        if !spec.after.is_empty() {
            println!("      after: {:?}", spec.after);
        }
    }

    debug!("dry-run complete (no execution)");
}
