// src/pool/mod.rs

//! Fixed worker pool: the ready queue, in-flight accounting, and the
//! worker loop that connects them.

pub mod ready_queue;
pub mod tracker;
pub mod worker;

pub use ready_queue::{Dequeue, ReadyQueue};
pub use tracker::{Completion, InFlightTracker};
pub use worker::spawn_workers;
