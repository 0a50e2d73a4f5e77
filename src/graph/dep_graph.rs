// src/graph/dep_graph.rs

//! Dependency bookkeeping for submitted tasks.
//!
//! Tracks every task from submission to completion. A task is *pending*
//! while any predecessor it named has not finished; once its unmet set
//! drains it is promoted out of the graph and never returns. Finished ids
//! are remembered for the lifetime of the scheduler so a later submission
//! can depend on a task that completed long ago.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::errors::{Result, SchedulerError};
use crate::graph::bulk_task::BulkTask;
use crate::types::{TaskId, TaskOutcome, Work};

/// Single-owner task ledger. Not internally synchronized: the controller
/// thread (the one inside `sync`) is the only mutator.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Ids not yet promoted, each mapped to the predecessors still unmet.
    /// An empty set means the task is ready and will leave on the next
    /// promotion sweep.
    pending: HashMap<TaskId, HashSet<TaskId>>,
    /// Submission records for pending ids.
    records: HashMap<TaskId, BulkTask>,
    /// Every id that ever finished, with how it went. Grows monotonically.
    completed: HashMap<TaskId, TaskOutcome>,
    /// Next id to hand out. Ids are issued densely from zero.
    next_id: TaskId,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new task and return its id.
    ///
    /// Predecessors that already finished are dropped from the unmet set
    /// here, at submission time, so a task whose dependencies all completed
    /// in an earlier batch becomes ready immediately instead of waiting for
    /// a completion event that will never arrive.
    pub fn submit(&mut self, work: Work, total_units: usize, deps: &[TaskId]) -> Result<TaskId> {
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

        let unmet: HashSet<TaskId> = deps
            .iter()
            .copied()
            .filter(|dep| !self.completed.contains_key(dep))
            .collect();
        debug!(
            task = id,
            total_units,
            deps = deps.len(),
            unmet = unmet.len(),
            "task submitted"
        );
        self.pending.insert(id, unmet);
        self.records.insert(id, BulkTask::new(id, work, total_units));
        Ok(id)
    }

    /// Sweep the pending set and pull out every task whose unmet set has
    /// drained. Promoted tasks leave the graph for good; their records are
    /// returned to the caller for dispatch.
    pub fn promote_ready(&mut self) -> Vec<BulkTask> {
        let ready: Vec<TaskId> = self
            .pending
            .iter()
            .filter(|(_, unmet)| unmet.is_empty())
            .map(|(id, _)| *id)
            .collect();
        let mut promoted = Vec::with_capacity(ready.len());
        for id in ready {
            self.pending.remove(&id);
            if let Some(task) = self.records.remove(&id) {
                trace!(task = id, "task promoted");
                promoted.push(task);
            }
        }
        promoted
    }

    /// Mark `finished` as complete and unblock everything that was waiting
    /// on it.
    pub fn resolve(&mut self, finished: TaskId, outcome: TaskOutcome) {
        trace!(task = finished, ?outcome, "task resolved");
        self.completed.insert(finished, outcome);
        for unmet in self.pending.values_mut() {
            unmet.remove(&finished);
        }
    }

    /// True when no task is waiting for promotion.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Outcome of a finished task, if it has finished.
    pub fn outcome(&self, id: TaskId) -> Option<TaskOutcome> {
        self.completed.get(&id).copied()
    }
}
