// tests/scheduler_parallelism.rs

//! Timing-based checks that the pool actually overlaps work. Margins are
//! deliberately generous so slow CI machines don't produce false failures.

use std::error::Error;
use std::time::{Duration, Instant};

use dagpool::{Executor, Scheduler, SchedulerError, WaitStrategy};
use dagpool_test_utils::recorder::Recorder;
use dagpool_test_utils::{init_tracing, with_deadline};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn units_of_one_task_overlap_across_workers() -> TestResult {
    init_tracing();
    with_deadline(|| -> Result<(), SchedulerError> {
        let pause = Duration::from_millis(50);
        let mut scheduler = Scheduler::new(4)?;
        let recorder = Recorder::new(8);

        let start = Instant::now();
        scheduler.run(recorder.work_sleeping(pause), 8)?;
        let elapsed = start.elapsed();

        assert!(recorder.all_exactly_once());
        // 8 units of 50ms on 4 workers needs two rounds, so at least
        // 100ms; run serially it would be 400ms. Anything well under the
        // serial time proves the overlap.
        assert!(
            elapsed >= Duration::from_millis(100),
            "8x50ms on 4 workers cannot finish in {elapsed:?}"
        );
        assert!(
            elapsed < Duration::from_millis(320),
            "expected parallel speedup, took {elapsed:?}"
        );
        Ok(())
    })?;
    Ok(())
}

#[test]
fn independent_tasks_share_the_pool() -> TestResult {
    init_tracing();
    with_deadline(|| -> Result<(), SchedulerError> {
        let pause = Duration::from_millis(30);
        let mut scheduler = Scheduler::new(4)?;
        let left = Recorder::new(4);
        let right = Recorder::new(4);

        let start = Instant::now();
        scheduler.submit_async(left.work_sleeping(pause), 4, &[])?;
        scheduler.submit_async(right.work_sleeping(pause), 4, &[])?;
        scheduler.sync()?;
        let elapsed = start.elapsed();

        assert!(left.all_exactly_once());
        assert!(right.all_exactly_once());
        // 8 units of 30ms serially is 240ms; 4 workers need about 60ms.
        assert!(
            elapsed < Duration::from_millis(200),
            "independent tasks should overlap, took {elapsed:?}"
        );
        Ok(())
    })?;
    Ok(())
}

#[test]
fn spinning_pool_overlaps_work_too() -> TestResult {
    init_tracing();
    with_deadline(|| -> Result<(), SchedulerError> {
        let pause = Duration::from_millis(40);
        let mut scheduler = Scheduler::with_wait_strategy(4, WaitStrategy::Spin)?;
        let recorder = Recorder::new(4);

        let start = Instant::now();
        scheduler.run(recorder.work_sleeping(pause), 4)?;
        let elapsed = start.elapsed();

        assert!(recorder.all_exactly_once());
        // Serially this is 160ms; one unit per worker is one 40ms round.
        assert!(
            elapsed < Duration::from_millis(140),
            "expected parallel speedup, took {elapsed:?}"
        );
        scheduler.shutdown();
        Ok(())
    })?;
    Ok(())
}

#[test]
fn submission_does_not_block_on_execution() -> TestResult {
    init_tracing();
    with_deadline(|| -> Result<(), SchedulerError> {
        let pause = Duration::from_millis(50);
        let mut scheduler = Scheduler::new(2)?;
        let recorder = Recorder::new(8);

        // Submitting 400ms worth of work must return without running it.
        let start = Instant::now();
        scheduler.submit_async(recorder.work_sleeping(pause), 8, &[])?;
        let submit_elapsed = start.elapsed();
        assert!(
            submit_elapsed < Duration::from_millis(40),
            "submission should be quick, took {submit_elapsed:?}"
        );

        scheduler.sync()?;
        assert!(recorder.all_exactly_once());
        Ok(())
    })?;
    Ok(())
}
