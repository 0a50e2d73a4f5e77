// src/pool/tracker.rs

//! Per-task completion accounting for units in flight.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::warn;

use crate::graph::UnitFailure;
use crate::types::{TaskId, TaskOutcome};

/// Whole-task completion event, produced by whichever worker finishes the
/// last unit of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub task: TaskId,
    pub outcome: TaskOutcome,
}

#[derive(Debug)]
struct Entry {
    remaining: usize,
    failed: bool,
}

/// Counts outstanding units for every dispatched task.
///
/// The controller registers a task *before* its units reach the ready
/// queue, so a worker can never decrement a counter that does not exist
/// yet. Workers decrement as units finish; the one that takes an entry to
/// zero owns reporting the task's completion.
#[derive(Debug, Default)]
pub struct InFlightTracker {
    tasks: Mutex<HashMap<TaskId, Entry>>,
    first_failure: Mutex<Option<UnitFailure>>,
}

impl InFlightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `task` with `units` outstanding units.
    pub fn register(&self, task: TaskId, units: usize) {
        let mut tasks = self.tasks.lock();
        tasks.insert(task, Entry { remaining: units, failed: false });
    }

    /// Record one finished unit of `task`. Returns the task's outcome iff
    /// this was its last unit; the entry is removed in the same critical
    /// section, so exactly one caller gets `Some`.
    pub fn complete_unit(&self, task: TaskId, unit_failed: bool) -> Option<TaskOutcome> {
        let mut tasks = self.tasks.lock();
        let Some(entry) = tasks.get_mut(&task) else {
            warn!(task, "completion for untracked task ignored");
            return None;
        };
        entry.failed |= unit_failed;
        entry.remaining -= 1;
        if entry.remaining > 0 {
            return None;
        }
        let outcome = if entry.failed {
            TaskOutcome::Failed
        } else {
            TaskOutcome::Success
        };
        tasks.remove(&task);
        Some(outcome)
    }

    /// Keep the first panic observed across all workers; later ones only
    /// mark their task failed.
    pub fn record_failure(&self, failure: UnitFailure) {
        let mut slot = self.first_failure.lock();
        if slot.is_none() {
            *slot = Some(failure);
        }
    }

    /// Take the stored failure, clearing the slot for the next batch.
    pub fn take_failure(&self) -> Option<UnitFailure> {
        self.first_failure.lock().take()
    }
}
