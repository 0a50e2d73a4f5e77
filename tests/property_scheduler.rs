use std::collections::HashSet;

use proptest::prelude::*;

use dagpool::{Executor, Scheduler, TaskId, TaskOutcome};
use dagpool_test_utils::recorder::Recorder;

// Strategy to generate a random DAG shape plus unit counts.
// We ensure acyclicity by only allowing task N to depend on tasks 0..N-1;
// the raw indices are sanitized with a modulo inside the test body.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<usize>)> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        (
            proptest::collection::vec(
                proptest::collection::vec(any::<usize>(), 0..num_tasks),
                num_tasks,
            ),
            proptest::collection::vec(1..5usize, num_tasks),
        )
    })
}

/// Sanitize potential dependency indices for task `i`: only indices below
/// `i` are valid, and duplicates collapse.
fn sanitize_deps(i: usize, potential: &[usize], ids: &[TaskId]) -> Vec<TaskId> {
    let mut valid_indices = HashSet::new();
    for dep_idx in potential {
        if i > 0 {
            valid_indices.insert(dep_idx % i);
        }
    }
    valid_indices.into_iter().map(|idx| ids[idx]).collect()
}

proptest! {
    #[test]
    fn random_dags_terminate_and_run_every_unit(
        (raw_deps, units) in dag_strategy(8),
    ) {
        let mut scheduler = Scheduler::new(2).expect("scheduler construction");
        let mut recorders = Vec::new();
        let mut ids: Vec<TaskId> = Vec::new();

        for (i, potential) in raw_deps.iter().enumerate() {
            let deps = sanitize_deps(i, potential, &ids);
            let recorder = Recorder::new(units[i]);
            let id = scheduler
                .submit_async(recorder.work(), units[i], &deps)
                .expect("valid submission");
            ids.push(id);
            recorders.push(recorder);
        }

        scheduler.sync().expect("barrier must complete");

        for (i, recorder) in recorders.iter().enumerate() {
            prop_assert!(
                recorder.all_exactly_once(),
                "task {} skipped or repeated a unit",
                i
            );
            prop_assert_eq!(scheduler.outcome(ids[i]), Some(TaskOutcome::Success));
        }
    }

    // Split the same workload across two batches at a random point. Tasks in
    // the second batch may depend on ids that completed in the first, which
    // must be satisfied from the completed-set rather than waited on.
    #[test]
    fn random_dags_survive_an_interleaved_barrier(
        (raw_deps, units) in dag_strategy(8),
        split in any::<proptest::sample::Index>(),
    ) {
        let split = split.index(raw_deps.len() + 1);
        let mut scheduler = Scheduler::new(2).expect("scheduler construction");
        let mut recorders = Vec::new();
        let mut ids: Vec<TaskId> = Vec::new();

        for (i, potential) in raw_deps.iter().enumerate() {
            if i == split {
                scheduler.sync().expect("mid-workload barrier must complete");
            }
            let deps = sanitize_deps(i, potential, &ids);
            let recorder = Recorder::new(units[i]);
            let id = scheduler
                .submit_async(recorder.work(), units[i], &deps)
                .expect("valid submission");
            ids.push(id);
            recorders.push(recorder);
        }

        scheduler.sync().expect("final barrier must complete");

        for (i, recorder) in recorders.iter().enumerate() {
            prop_assert!(
                recorder.all_exactly_once(),
                "task {} skipped or repeated a unit",
                i
            );
        }
    }
}
