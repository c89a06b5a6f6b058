//! Parallel vanity search.
//!
//! This module provides:
//! - `SearchTask`: a worker's private slice of private-key space
//! - `CpuWorker`: the scan loop (derive, test, advance)
//! - `WorkerPool`: thread spawning, first-match coordination, statistics

mod cpu;
mod pool;

pub use cpu::{CpuWorker, SearchTask, WorkerStats};
pub use pool::{PoolWait, VanityResult, WorkerPool};
