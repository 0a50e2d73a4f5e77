// src/baseline/spawn.rs

//! Thread-per-call executor.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::errors::{Result, SchedulerError};
use crate::executor::Executor;
use crate::types::{TaskId, Work, WorkFn};

/// Spawns a fresh set of threads for every submission and joins them
/// before returning. Units are handed out dynamically through a shared
/// atomic counter, so uneven unit costs still balance across threads.
///
/// Pays full thread start-up cost per task; exists to show what the
/// persistent pool saves.
#[derive(Debug)]
pub struct SpawnExecutor {
    num_workers: usize,
    next_id: TaskId,
}

impl SpawnExecutor {
    pub fn new(num_workers: usize) -> Result<Self> {
        if num_workers == 0 {
            return Err(SchedulerError::InvalidArgument(
                "worker pool needs at least one thread".to_string(),
            ));
        }
        Ok(Self {
            num_workers,
            next_id: 0,
        })
    }

    fn run_batch(&self, work: &WorkFn, total_units: usize) {
        let next_index = AtomicUsize::new(0);
        thread::scope(|scope| {
            for _ in 0..self.num_workers {
                scope.spawn(|| {
                    loop {
                        let index = next_index.fetch_add(1, Ordering::Relaxed);
                        if index >= total_units {
                            break;
                        }
                        work(index, total_units);
                    }
                });
            }
        });
    }
}

impl Executor for SpawnExecutor {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn submit_async(&mut self, work: Work, total_units: usize, deps: &[TaskId]) -> Result<TaskId> {
        if total_units == 0 {
            return Err(SchedulerError::InvalidArgument(
                "a bulk task must have at least one unit".to_string(),
            ));
        }
        for dep in deps {
            if *dep >= self.next_id {
                return Err(SchedulerError::UnknownDependency(*dep));
            }
        }
        let id = self.next_id;
        self.next_id += 1;
        // Synchronous like the serial executor: earlier submissions are
        // already done, so dependencies never defer anything here.
        self.run_batch(&*work, total_units);
        Ok(id)
    }

    fn sync(&mut self) -> Result<()> {
        Ok(())
    }
}
