#![allow(dead_code)]

use std::collections::BTreeMap;
use dagpool::config::{GlobalSection, RawWorkloadFile, TaskSpec, WorkloadFile};

/// Builder for `WorkloadFile` to simplify test setup.
pub struct WorkloadBuilder {
    workload: RawWorkloadFile,
}

impl WorkloadBuilder {
    pub fn new() -> Self {
        Self {
            workload: RawWorkloadFile {
                config: GlobalSection::default(),
                task: BTreeMap::new(),
            },
        }
    }

    pub fn with_task(mut self, name: &str, spec: TaskSpec) -> Self {
        self.workload.task.insert(name.to_string(), spec);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workload.config.workers = workers;
        self
    }

    /// The raw file, for tests that exercise validation failures.
    pub fn build_raw(self) -> RawWorkloadFile {
        self.workload
    }

    pub fn build(self) -> WorkloadFile {
        WorkloadFile::try_from(self.workload).expect("Failed to build valid workload from builder")
    }
}

impl Default for WorkloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskSpec`.
pub struct TaskSpecBuilder {
    spec: TaskSpec,
}

impl TaskSpecBuilder {
    pub fn new(units: usize) -> Self {
        Self {
            spec: TaskSpec {
                units,
                unit_millis: 1,
                after: vec![],
            },
        }
    }

    pub fn unit_millis(mut self, millis: u64) -> Self {
        self.spec.unit_millis = millis;
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.spec.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> TaskSpec {
        self.spec
    }
}
