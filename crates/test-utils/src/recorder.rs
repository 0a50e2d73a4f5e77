//! Instrumented work callbacks for asserting on execution behaviour.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use dagpool::Work;
use parking_lot::Mutex;

/// Records how often each unit index of one bulk task ran, and the time
/// window the task's units occupied.
///
/// Create one per task, hand [`work`](Recorder::work) to the executor, and
/// assert afterwards:
///
/// - [`all_exactly_once`](Recorder::all_exactly_once) for exactly-once
///   execution,
/// - [`finished_at`](Recorder::finished_at) vs another recorder's
///   [`started_at`](Recorder::started_at) for dependency ordering.
pub struct Recorder {
    counts: Arc<Vec<AtomicUsize>>,
    window: Arc<Mutex<Option<(Instant, Instant)>>>,
}

impl Recorder {
    pub fn new(total_units: usize) -> Self {
        let counts = (0..total_units).map(|_| AtomicUsize::new(0)).collect();
        Self {
            counts: Arc::new(counts),
            window: Arc::new(Mutex::new(None)),
        }
    }

    /// A callback that just records its invocation.
    pub fn work(&self) -> Work {
        self.work_sleeping(Duration::ZERO)
    }

    /// A callback that sleeps `pause` per unit before recording, to give
    /// units measurable duration.
    pub fn work_sleeping(&self, pause: Duration) -> Work {
        let counts = Arc::clone(&self.counts);
        let window = Arc::clone(&self.window);
        Arc::new(move |index, _total| {
            let start = Instant::now();
            if !pause.is_zero() {
                thread::sleep(pause);
            }
            if let Some(slot) = counts.get(index) {
                slot.fetch_add(1, Ordering::SeqCst);
            }
            let end = Instant::now();
            let mut guard = window.lock();
            match guard.as_mut() {
                Some((first, last)) => {
                    if start < *first {
                        *first = start;
                    }
                    if end > *last {
                        *last = end;
                    }
                }
                None => *guard = Some((start, end)),
            }
        })
    }

    /// A callback that panics on `panic_index` and records everywhere else.
    pub fn work_panicking_at(&self, panic_index: usize) -> Work {
        let counts = Arc::clone(&self.counts);
        Arc::new(move |index, _total| {
            if index == panic_index {
                panic!("unit {index} failed on purpose");
            }
            if let Some(slot) = counts.get(index) {
                slot.fetch_add(1, Ordering::SeqCst);
            }
        })
    }

    /// How many times the unit at `index` ran.
    pub fn count(&self, index: usize) -> usize {
        self.counts
            .get(index)
            .map(|slot| slot.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total invocations across all units.
    pub fn total(&self) -> usize {
        self.counts
            .iter()
            .map(|slot| slot.load(Ordering::SeqCst))
            .sum()
    }

    /// True when every unit ran exactly once.
    pub fn all_exactly_once(&self) -> bool {
        self.counts
            .iter()
            .all(|slot| slot.load(Ordering::SeqCst) == 1)
    }

    /// Entry time of the earliest recorded unit.
    pub fn started_at(&self) -> Option<Instant> {
        self.window.lock().map(|(first, _)| first)
    }

    /// Exit time of the latest recorded unit.
    pub fn finished_at(&self) -> Option<Instant> {
        self.window.lock().map(|(_, last)| last)
    }
}
