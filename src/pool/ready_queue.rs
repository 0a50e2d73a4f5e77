// src/pool/ready_queue.rs

//! Shared queue of dispatchable work units.
//!
//! Producers (the controller inside `sync`) push batches; consumers (the
//! workers) pop one unit at a time. With [`WaitStrategy::Sleep`] an empty
//! queue parks the consumer on a condvar until work or shutdown arrives;
//! with [`WaitStrategy::Spin`] the consumer re-polls in a busy loop, which
//! trades idle CPU for wake latency.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use crate::graph::WorkUnit;
use crate::types::WaitStrategy;

/// What a consumer gets back from [`ReadyQueue::pop`].
#[derive(Debug)]
pub enum Dequeue {
    /// A unit to execute.
    Unit(WorkUnit),
    /// The queue is closed and fully drained; the consumer should exit.
    Shutdown,
}

#[derive(Debug, Default)]
struct QueueState {
    units: VecDeque<WorkUnit>,
    closed: bool,
}

/// Mutex-and-condvar work queue shared by the controller and the workers.
#[derive(Debug)]
pub struct ReadyQueue {
    state: Mutex<QueueState>,
    available: Condvar,
    strategy: WaitStrategy,
}

impl ReadyQueue {
    pub fn new(strategy: WaitStrategy) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            available: Condvar::new(),
            strategy,
        }
    }

    /// Append a batch of units and wake every parked consumer.
    ///
    /// One lock acquisition per batch, not per unit; for a bulk task this is
    /// the difference between one wakeup storm and `total_units` of them.
    pub fn push_batch(&self, units: impl IntoIterator<Item = WorkUnit>) {
        let mut state = self.state.lock();
        state.units.extend(units);
        drop(state);
        self.available.notify_all();
    }

    /// Take the next unit, waiting according to the configured strategy.
    ///
    /// After [`close`](Self::close) the queue keeps handing out remaining
    /// units; `Shutdown` is only returned once it is both closed and empty,
    /// so no accepted unit is ever dropped.
    pub fn pop(&self) -> Dequeue {
        match self.strategy {
            WaitStrategy::Sleep => self.pop_sleeping(),
            WaitStrategy::Spin => self.pop_spinning(),
        }
    }

    fn pop_sleeping(&self) -> Dequeue {
        let mut state = self.state.lock();
        loop {
            if let Some(unit) = state.units.pop_front() {
                return Dequeue::Unit(unit);
            }
            if state.closed {
                return Dequeue::Shutdown;
            }
            self.available.wait(&mut state);
        }
    }

    fn pop_spinning(&self) -> Dequeue {
        loop {
            {
                let mut state = self.state.lock();
                if let Some(unit) = state.units.pop_front() {
                    return Dequeue::Unit(unit);
                }
                if state.closed {
                    return Dequeue::Shutdown;
                }
            }
            std::hint::spin_loop();
        }
    }

    /// Close the queue and wake all parked consumers so they can observe it.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        drop(state);
        self.available.notify_all();
    }
}
