// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{RawWorkloadFile, WorkloadFile};
use crate::errors::{Result, SchedulerError};

impl TryFrom<RawWorkloadFile> for WorkloadFile {
    type Error = crate::errors::SchedulerError;

    fn try_from(raw: RawWorkloadFile) -> std::result::Result<Self, Self::Error> {
        let order = validate_raw_workload(&raw)?;
        Ok(WorkloadFile::new_unchecked(raw.config, raw.task, order))
    }
}

fn validate_raw_workload(cfg: &RawWorkloadFile) -> Result<Vec<String>> {
    ensure_has_tasks(cfg)?;
    validate_global_config(cfg)?;
    validate_task_specs(cfg)?;
    validate_dag(cfg)
}

fn ensure_has_tasks(cfg: &RawWorkloadFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(SchedulerError::ConfigError(
            "workload must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawWorkloadFile) -> Result<()> {
    // `wait` and `executor` are strongly typed and validated during
    // deserialization, so only the numeric settings need checking here.

    if cfg.config.workers == 0 {
        return Err(SchedulerError::ConfigError(
            "[config].workers must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_task_specs(cfg: &RawWorkloadFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if task.units == 0 {
            return Err(SchedulerError::ConfigError(format!(
                "task '{}' must have units >= 1 (got 0)",
                name
            )));
        }
        for dep in task.after.iter() {
            if !cfg.task.contains_key(dep) {
                return Err(SchedulerError::ConfigError(format!(
                    "task '{}' has unknown dependency '{}' in `after`",
                    name, dep
                )));
            }
            if dep == name {
                return Err(SchedulerError::ConfigError(format!(
                    "task '{}' cannot depend on itself in `after`",
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawWorkloadFile) -> Result<Vec<String>> {
    // Edges point dep -> task, so for
    //   [task.B]
    //   after = ["A"]
    // we add A -> B and a topological order lists A before B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, task) in cfg.task.iter() {
        for dep in task.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
    }

    // A topological sort fails iff there is a cycle; on success its order
    // doubles as the submission order.
    match toposort(&graph, None) {
        Ok(order) => Ok(order.into_iter().map(str::to_string).collect()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(SchedulerError::DagCycle(format!(
                "cycle detected in task dependencies involving task '{}'",
                node
            )))
        }
    }
}
