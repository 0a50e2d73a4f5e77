// src/executor.rs

//! The execution contract shared by the scheduler and the baseline
//! executors, so callers and benchmarks can swap implementations without
//! changing call sites.

use crate::errors::Result;
use crate::types::{TaskId, Work};

/// Something that can execute bulk tasks.
///
/// A *bulk task* is one callback invoked once per index in
/// `[0, total_units)`. Implementations differ in how much parallelism and
/// asynchrony they provide, not in what they compute: after a successful
/// [`sync`](Executor::sync), every unit of every submitted task has run
/// exactly once.
///
/// Panic handling differs by implementation: the pooled scheduler catches a
/// panicking unit and surfaces the first one at the barrier, while the
/// baseline executors run units during submission and let a panic unwind
/// out of the submitting call.
pub trait Executor {
    /// Short stable name, for logs and timing reports.
    fn name(&self) -> &'static str;

    /// Submit a bulk task that may not start until its dependencies finish.
    ///
    /// `deps` lists ids returned by earlier submissions on this executor;
    /// an id never issued is rejected with
    /// [`UnknownDependency`](crate::errors::SchedulerError::UnknownDependency).
    /// The call records the task and returns immediately; whether any unit
    /// has run by the time it returns is unspecified.
    fn submit_async(&mut self, work: Work, total_units: usize, deps: &[TaskId]) -> Result<TaskId>;

    /// Block until every task submitted so far has fully completed.
    ///
    /// Returns the first callback panic observed since the previous
    /// barrier, if any; the barrier itself still completes before the
    /// error is reported.
    fn sync(&mut self) -> Result<()>;

    /// Execute one dependency-free bulk task to completion.
    fn run(&mut self, work: Work, total_units: usize) -> Result<()> {
        self.submit_async(work, total_units, &[])?;
        self.sync()
    }
}
