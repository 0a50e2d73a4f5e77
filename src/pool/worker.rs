// src/pool/worker.rs

//! Worker thread loop.
//!
//! Each worker pops units from the shared [`ReadyQueue`], runs the
//! callback under a panic guard, and reports unit completion to the
//! [`InFlightTracker`]. The worker that retires the last unit of a task
//! sends the whole-task [`Completion`] to the controller.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use tracing::{debug, error, trace};

use crate::errors::Result;
use crate::graph::{UnitFailure, WorkUnit};
use crate::pool::ready_queue::{Dequeue, ReadyQueue};
use crate::pool::tracker::{Completion, InFlightTracker};

/// Spawn `count` named worker threads sharing `queue` and `tracker`.
pub fn spawn_workers(
    count: usize,
    queue: Arc<ReadyQueue>,
    tracker: Arc<InFlightTracker>,
    completions: Sender<Completion>,
) -> Result<Vec<JoinHandle<()>>> {
    let mut handles = Vec::with_capacity(count);
    for i in 0..count {
        let queue = Arc::clone(&queue);
        let tracker = Arc::clone(&tracker);
        let completions = completions.clone();
        let handle = thread::Builder::new()
            .name(format!("dagpool-worker-{i}"))
            .spawn(move || worker_loop(i, &queue, &tracker, &completions))?;
        handles.push(handle);
    }
    Ok(handles)
}

fn worker_loop(
    worker: usize,
    queue: &ReadyQueue,
    tracker: &InFlightTracker,
    completions: &Sender<Completion>,
) {
    debug!(worker, "worker started");
    loop {
        let unit = match queue.pop() {
            Dequeue::Unit(unit) => unit,
            Dequeue::Shutdown => break,
        };
        let failed = run_unit(&unit, tracker);
        if let Some(outcome) = tracker.complete_unit(unit.parent, failed) {
            // A closed channel means the scheduler is mid-teardown and no
            // longer listening; nothing left for this event to unblock.
            let _ = completions.send(Completion {
                task: unit.parent,
                outcome,
            });
        }
    }
    debug!(worker, "worker exiting");
}

/// Run one unit, containing any panic from the callback. Returns whether
/// the unit failed.
fn run_unit(unit: &WorkUnit, tracker: &InFlightTracker) -> bool {
    trace!(task = unit.parent, index = unit.index, "unit starting");
    match panic::catch_unwind(AssertUnwindSafe(|| unit.execute())) {
        Ok(()) => {
            trace!(task = unit.parent, index = unit.index, "unit finished");
            false
        }
        Err(payload) => {
            let message = panic_message(payload);
            error!(
                task = unit.parent,
                index = unit.index,
                message = %message,
                "work callback panicked"
            );
            tracker.record_failure(UnitFailure {
                task: unit.parent,
                index: unit.index,
                message,
            });
            true
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&str>() {
            Ok(message) => message.to_string(),
            Err(_) => "unknown panic payload".to_string(),
        },
    }
}
