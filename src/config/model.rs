// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{ExecutorKind, WaitStrategy};

/// Top-level workload description as read from a TOML file.
///
/// ```toml
/// [config]
/// workers = 4
/// wait = "sleep"
/// executor = "pool"
///
/// [task.render]
/// units = 64
/// unit_millis = 5
///
/// [task.encode]
/// units = 16
/// unit_millis = 10
/// after = ["render"]
/// ```
///
/// The `[config]` section is optional and has reasonable defaults; the
/// workload needs at least one `[task.<name>]` section to mean anything.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWorkloadFile {
    /// Global execution settings from `[config]`.
    #[serde(default)]
    pub config: GlobalSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    #[serde(default)]
    pub task: BTreeMap<String, TaskSpec>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalSection {
    /// Worker thread count for the pooled executors.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Idle-wait strategy when `executor = "pool"`: `"sleep"` or `"spin"`.
    #[serde(default)]
    pub wait: WaitStrategy,

    /// Which executor runs the workload: `"serial"`, `"spawn"`, `"spin"`
    /// or `"pool"`.
    #[serde(default)]
    pub executor: ExecutorKind,
}

fn default_workers() -> usize {
    4
}

impl Default for GlobalSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            wait: WaitStrategy::default(),
            executor: ExecutorKind::default(),
        }
    }
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSpec {
    /// Number of units in the bulk task.
    pub units: usize,

    /// Simulated cost of one unit, in milliseconds.
    #[serde(default = "default_unit_millis")]
    pub unit_millis: u64,

    /// Names of tasks that must finish before this one starts.
    ///
    /// This is the TOML `after = ["A", "B"]` field.
    #[serde(default)]
    pub after: Vec<String>,
}

fn default_unit_millis() -> u64 {
    1
}

/// A workload that passed validation: every `after` reference resolves, no
/// task depends on itself, the dependency graph is acyclic, and unit counts
/// are sane.
#[derive(Debug, Clone)]
pub struct WorkloadFile {
    config: GlobalSection,
    tasks: BTreeMap<String, TaskSpec>,
    order: Vec<String>,
}

impl WorkloadFile {
    /// Construct without re-validating; only `validate.rs` calls this,
    /// after the checks have passed.
    pub(crate) fn new_unchecked(
        config: GlobalSection,
        tasks: BTreeMap<String, TaskSpec>,
        order: Vec<String>,
    ) -> Self {
        Self { config, tasks, order }
    }

    pub fn config(&self) -> &GlobalSection {
        &self.config
    }

    pub fn tasks(&self) -> &BTreeMap<String, TaskSpec> {
        &self.tasks
    }

    /// Task names in an order where every dependency precedes its
    /// dependents, so tasks can be submitted front to back and each
    /// `after` name already has an id.
    pub fn submission_order(&self) -> &[String] {
        &self.order
    }

    /// Tasks paired with their specs, in submission order.
    pub fn ordered_tasks(&self) -> impl Iterator<Item = (&str, &TaskSpec)> {
        self.order
            .iter()
            .filter_map(|name| self.tasks.get(name).map(|spec| (name.as_str(), spec)))
    }
}
