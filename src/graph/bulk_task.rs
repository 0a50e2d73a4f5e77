// src/graph/bulk_task.rs

//! Records describing submitted work.

use std::fmt;
use std::sync::Arc;

use crate::types::{TaskId, Work};

/// One client submission: "invoke `work` once for every index in
/// `[0, total_units)`".
///
/// Owned by the scheduler from submission until completion; the caller keeps
/// only the id. While the task is pending the record sits in the dependency
/// graph; promotion consumes it into one [`WorkUnit`] per index.
pub struct BulkTask {
    pub id: TaskId,
    pub work: Work,
    pub total_units: usize,
}

impl BulkTask {
    pub fn new(id: TaskId, work: Work, total_units: usize) -> Self {
        Self {
            id,
            work,
            total_units,
        }
    }

    /// Split this task into its dispatchable units. The callback is shared
    /// behind an `Arc`, so each unit carries a handle rather than a copy.
    pub fn into_units(self) -> impl Iterator<Item = WorkUnit> {
        let BulkTask {
            id,
            work,
            total_units,
        } = self;
        (0..total_units).map(move |index| WorkUnit {
            parent: id,
            index,
            total: total_units,
            work: Arc::clone(&work),
        })
    }
}

impl fmt::Debug for BulkTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkTask")
            .field("id", &self.id)
            .field("total_units", &self.total_units)
            .finish_non_exhaustive()
    }
}

/// The minimum schedulable piece: one `(index, total)` invocation of a bulk
/// task's callback. Created on promotion, consumed exactly once by exactly
/// one worker, then discarded.
pub struct WorkUnit {
    pub parent: TaskId,
    pub index: usize,
    pub total: usize,
    pub work: Work,
}

impl WorkUnit {
    /// Run the callback for this unit.
    pub fn execute(&self) {
        (*self.work)(self.index, self.total);
    }
}

impl fmt::Debug for WorkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkUnit")
            .field("parent", &self.parent)
            .field("index", &self.index)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

/// Captured record of a panicking unit, surfaced to the next barrier caller.
#[derive(Debug, Clone)]
pub struct UnitFailure {
    pub task: TaskId,
    pub index: usize,
    pub message: String,
}
