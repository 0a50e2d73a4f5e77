// src/scheduler.rs

//! The thread-pool scheduler.
//!
//! A fixed pool of workers drains a shared ready queue; the thread calling
//! [`Scheduler::sync`] becomes the controller, moving tasks from the
//! dependency graph to the queue as their predecessors finish and blocking
//! on the completion channel in between. Workers never inspect
//! dependencies and the controller never runs units, so neither side holds
//! the other's locks.

use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::anyhow;
use crossbeam_channel::Receiver;
use tracing::{debug, warn};

use crate::errors::{Result, SchedulerError};
use crate::executor::Executor;
use crate::graph::{BulkTask, DependencyGraph, UnitFailure};
use crate::pool::{Completion, InFlightTracker, ReadyQueue, spawn_workers};
use crate::types::{TaskId, TaskOutcome, WaitStrategy, Work};

/// Dependency-aware bulk task executor over a fixed worker pool.
///
/// Submission is cheap and never blocks on execution; all promotion,
/// dispatch, and completion handling happens inside [`sync`](Executor::sync).
/// Dropping the scheduler shuts it down.
#[derive(Debug)]
pub struct Scheduler {
    graph: DependencyGraph,
    queue: Arc<ReadyQueue>,
    tracker: Arc<InFlightTracker>,
    completions: Receiver<Completion>,
    workers: Vec<JoinHandle<()>>,
    strategy: WaitStrategy,
    shut_down: bool,
}

impl Scheduler {
    /// Start a scheduler whose idle workers sleep.
    pub fn new(num_workers: usize) -> Result<Self> {
        Self::with_wait_strategy(num_workers, WaitStrategy::default())
    }

    /// Start a scheduler with an explicit idle-wait strategy.
    pub fn with_wait_strategy(num_workers: usize, strategy: WaitStrategy) -> Result<Self> {
        if num_workers == 0 {
            return Err(SchedulerError::InvalidArgument(
                "worker pool needs at least one thread".to_string(),
            ));
        }
        let queue = Arc::new(ReadyQueue::new(strategy));
        let tracker = Arc::new(InFlightTracker::new());
        let (sender, receiver) = crossbeam_channel::unbounded();
        let workers = spawn_workers(
            num_workers,
            Arc::clone(&queue),
            Arc::clone(&tracker),
            sender,
        )?;
        debug!(num_workers, ?strategy, "scheduler started");
        Ok(Self {
            graph: DependencyGraph::new(),
            queue,
            tracker,
            completions: receiver,
            workers,
            strategy,
            shut_down: false,
        })
    }

    /// Outcome of a finished task, if it has finished.
    pub fn outcome(&self, id: TaskId) -> Option<TaskOutcome> {
        self.graph.outcome(id)
    }

    /// Stop the pool: close the queue, let workers drain what was already
    /// dispatched, and join them. Tasks still waiting on dependencies are
    /// discarded. Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        debug!("scheduler shutting down");
        self.queue.close();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("worker thread panicked during shutdown");
            }
        }
    }

    fn ensure_running(&self) -> Result<()> {
        if self.shut_down {
            return Err(SchedulerError::InvalidArgument(
                "scheduler is shut down".to_string(),
            ));
        }
        Ok(())
    }

    /// Hand a promoted task to the pool. The tracker entry is registered
    /// before any unit is queued, so a worker can never complete a unit of
    /// a task the tracker has not seen.
    fn dispatch(&mut self, task: BulkTask) {
        debug!(task = task.id, units = task.total_units, "dispatching task");
        self.tracker.register(task.id, task.total_units);
        self.queue.push_batch(task.into_units());
    }
}

impl Executor for Scheduler {
    fn name(&self) -> &'static str {
        match self.strategy {
            WaitStrategy::Sleep => "pool",
            WaitStrategy::Spin => "pool-spin",
        }
    }

    fn submit_async(&mut self, work: Work, total_units: usize, deps: &[TaskId]) -> Result<TaskId> {
        self.ensure_running()?;
        self.graph.submit(work, total_units, deps)
    }

    fn sync(&mut self) -> Result<()> {
        self.ensure_running()?;
        // Tasks dispatched by this barrier whose completion event has not
        // been consumed yet. Kept controller-local so the emptiness test
        // cannot race the workers' own bookkeeping; every dispatch is
        // matched by a resolve before the barrier returns.
        let mut in_flight: usize = 0;
        loop {
            for task in self.graph.promote_ready() {
                self.dispatch(task);
                in_flight += 1;
            }
            // Quiescence check before blocking: an idle scheduler must
            // return instead of waiting for a completion that will never
            // arrive.
            if self.graph.is_empty() && in_flight == 0 {
                break;
            }
            // Block for one completion, then drain whatever else is
            // already buffered before the next promotion sweep.
            let first = self
                .completions
                .recv()
                .map_err(|_| anyhow!("completion channel closed with work outstanding"))?;
            self.graph.resolve(first.task, first.outcome);
            in_flight -= 1;
            while let Ok(next) = self.completions.try_recv() {
                self.graph.resolve(next.task, next.outcome);
                in_flight -= 1;
            }
        }
        match self.tracker.take_failure() {
            Some(UnitFailure {
                task,
                index,
                message,
            }) => Err(SchedulerError::UnitPanic {
                task,
                index,
                message,
            }),
            None => Ok(()),
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
