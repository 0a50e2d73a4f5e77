// tests/executor_contract.rs

//! Behaviour every executor must share: exactly-once unit execution,
//! argument validation, and a barrier that always returns.

use std::error::Error;

use dagpool::{Executor, Scheduler, SchedulerError, SerialExecutor, SpawnExecutor, WaitStrategy};
use dagpool_test_utils::recorder::Recorder;
use dagpool_test_utils::{init_tracing, with_deadline};

type TestResult = Result<(), Box<dyn Error>>;

/// Run one 100-unit task and check that every index ran exactly once.
fn exercise_exactly_once(executor: &mut dyn Executor) -> TestResult {
    let recorder = Recorder::new(100);
    executor.run(recorder.work(), 100)?;
    assert!(
        recorder.all_exactly_once(),
        "[{}] every unit should run exactly once, got counts {:?}",
        executor.name(),
        (0..100).map(|i| recorder.count(i)).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn serial_runs_every_unit_exactly_once() -> TestResult {
    init_tracing();
    exercise_exactly_once(&mut SerialExecutor::new())
}

#[test]
fn spawn_runs_every_unit_exactly_once() -> TestResult {
    init_tracing();
    exercise_exactly_once(&mut SpawnExecutor::new(4)?)
}

#[test]
fn pool_runs_every_unit_exactly_once() -> TestResult {
    init_tracing();
    exercise_exactly_once(&mut Scheduler::new(4)?)
}

#[test]
fn spinning_pool_runs_every_unit_exactly_once() -> TestResult {
    init_tracing();
    exercise_exactly_once(&mut Scheduler::with_wait_strategy(2, WaitStrategy::Spin)?)
}

#[test]
fn callback_receives_its_index_and_the_total() -> TestResult {
    init_tracing();
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = std::sync::Arc::clone(&seen);

    let mut scheduler = Scheduler::new(3)?;
    scheduler.run(
        std::sync::Arc::new(move |index, total| {
            sink.lock().unwrap().push((index, total));
        }),
        7,
    )?;

    let mut pairs = seen.lock().unwrap().clone();
    pairs.sort_unstable();
    let expected: Vec<(usize, usize)> = (0..7).map(|i| (i, 7)).collect();
    assert_eq!(pairs, expected);
    Ok(())
}

#[test]
fn pool_handles_a_single_unit_task() -> TestResult {
    init_tracing();
    let mut scheduler = Scheduler::new(4)?;
    let recorder = Recorder::new(1);
    scheduler.run(recorder.work(), 1)?;
    assert_eq!(recorder.count(0), 1);
    Ok(())
}

#[test]
fn pool_handles_more_workers_than_units() -> TestResult {
    init_tracing();
    let mut scheduler = Scheduler::new(8)?;
    let recorder = Recorder::new(2);
    scheduler.run(recorder.work(), 2)?;
    assert!(recorder.all_exactly_once());
    Ok(())
}

#[test]
fn many_small_tasks_back_to_back() -> TestResult {
    init_tracing();
    let mut scheduler = Scheduler::new(4)?;
    for _ in 0..50 {
        let recorder = Recorder::new(3);
        scheduler.run(recorder.work(), 3)?;
        assert!(recorder.all_exactly_once());
    }
    Ok(())
}

#[test]
fn zero_units_is_rejected_everywhere() -> TestResult {
    init_tracing();
    let recorder = Recorder::new(0);

    let mut serial = SerialExecutor::new();
    assert!(matches!(
        serial.submit_async(recorder.work(), 0, &[]),
        Err(SchedulerError::InvalidArgument(_))
    ));

    let mut spawn = SpawnExecutor::new(2)?;
    assert!(matches!(
        spawn.submit_async(recorder.work(), 0, &[]),
        Err(SchedulerError::InvalidArgument(_))
    ));

    let mut pool = Scheduler::new(2)?;
    assert!(matches!(
        pool.submit_async(recorder.work(), 0, &[]),
        Err(SchedulerError::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn unknown_dependency_is_rejected_at_submission() -> TestResult {
    init_tracing();
    let mut scheduler = Scheduler::new(2)?;
    let recorder = Recorder::new(4);

    let err = scheduler
        .submit_async(recorder.work(), 4, &[17])
        .expect_err("an id that was never issued must be rejected");
    assert!(matches!(err, SchedulerError::UnknownDependency(17)));

    // The rejected submission must not burn an id.
    let id = scheduler.submit_async(recorder.work(), 4, &[])?;
    assert_eq!(id, 0);
    scheduler.sync()?;
    Ok(())
}

#[test]
fn dependency_on_own_id_is_rejected() -> TestResult {
    init_tracing();
    let mut scheduler = Scheduler::new(2)?;
    let recorder = Recorder::new(2);

    let first = scheduler.submit_async(recorder.work(), 2, &[])?;
    // The next id to be issued is `first + 1`; depending on it is a
    // forward reference and must fail.
    let err = scheduler
        .submit_async(recorder.work(), 2, &[first + 1])
        .expect_err("forward references must be rejected");
    assert!(matches!(err, SchedulerError::UnknownDependency(_)));
    scheduler.sync()?;
    Ok(())
}

#[test]
fn zero_workers_is_rejected() {
    init_tracing();
    assert!(matches!(
        Scheduler::new(0),
        Err(SchedulerError::InvalidArgument(_))
    ));
    assert!(matches!(
        SpawnExecutor::new(0),
        Err(SchedulerError::InvalidArgument(_))
    ));
}

#[test]
fn calls_after_shutdown_are_rejected() -> TestResult {
    init_tracing();
    with_deadline(|| -> Result<(), SchedulerError> {
        let mut scheduler = Scheduler::new(2)?;
        let recorder = Recorder::new(2);
        scheduler.run(recorder.work(), 2)?;

        scheduler.shutdown();
        scheduler.shutdown(); // idempotent

        assert!(matches!(
            scheduler.submit_async(recorder.work(), 2, &[]),
            Err(SchedulerError::InvalidArgument(_))
        ));
        assert!(matches!(
            scheduler.sync(),
            Err(SchedulerError::InvalidArgument(_))
        ));
        Ok(())
    })?;
    Ok(())
}

#[test]
fn ids_are_issued_densely_in_submission_order() -> TestResult {
    init_tracing();
    let mut scheduler = Scheduler::new(2)?;
    let recorder = Recorder::new(1);
    for expected in 0..5u64 {
        let id = scheduler.submit_async(recorder.work(), 1, &[])?;
        assert_eq!(id, expected);
    }
    scheduler.sync()?;
    Ok(())
}
