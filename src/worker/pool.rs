//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};

use crate::error::Error;
use crate::matcher::Pattern;
use crate::network::NetworkParameters;

use super::cpu::{CpuWorker, SearchTask, WorkerStats, WINDOW_OFFSET};

/// Result of a successful vanity search.
#[derive(Debug, Clone)]
pub struct VanityResult {
    /// The private key, hex encoded
    pub private_key: String,
    /// The private key in Wallet Import Format
    pub wif: String,
    /// The matching address
    pub address: String,
    /// The ID of the worker that found this result
    pub worker_id: usize,
}

/// Outcome of waiting on the pool for one report interval.
#[derive(Debug)]
pub enum PoolWait {
    /// A worker reported a match or a fatal error.
    Result(Result<VanityResult, Error>),
    /// Nothing happened within the timeout.
    Timeout,
    /// Every worker exhausted its window without reporting.
    Exhausted,
}

/// Manages a pool of search workers.
///
/// Workers share only the stop flag and the statistics counters; each owns
/// its task, curve context, and scratch state. The coordinator blocks on the
/// result channel, never on any particular thread: the first worker to
/// finish sends its report, the coordinator raises the stop flag, and
/// `join` then waits for every worker's orderly exit.
pub struct WorkerPool {
    num_workers: usize,
    handles: Option<Vec<JoinHandle<()>>>,
    result_rx: Receiver<Result<VanityResult, Error>>,
    stop_flag: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
    start_time: Instant,
}

impl WorkerPool {
    /// Spawns `num_workers` threads scanning disjoint regions derived from
    /// `seed`.
    ///
    /// Worker `i` starts its 64-bit window at the seed's embedded window
    /// plus the unique non-zero offset `(i + 1) * (u64::MAX / (n + 1))`.
    /// Disjointness over a run is probabilistic: the evenly spaced start
    /// points can only collide after ~2^64 / n attempts per worker.
    pub fn new(
        num_workers: usize,
        pattern: Pattern,
        network: NetworkParameters,
        seed: [u8; 32],
    ) -> Self {
        let (result_tx, result_rx) = bounded(num_workers.max(1));
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());

        let mut base_window = [0u8; 8];
        base_window.copy_from_slice(&seed[WINDOW_OFFSET..]);
        let base = u64::from_be_bytes(base_window);
        let spacing = u64::MAX / (num_workers as u64 + 1);

        let handles = (0..num_workers)
            .map(|id| {
                let offset = (id as u64 + 1) * spacing;
                let task = SearchTask::new(&seed, base.wrapping_add(offset));
                let worker = CpuWorker::new(
                    id,
                    pattern.clone(),
                    network,
                    task,
                    result_tx.clone(),
                    stop_flag.clone(),
                    stats.clone(),
                );

                thread::Builder::new()
                    .name(format!("vanity-worker-{}", id))
                    .spawn(move || worker.run())
                    .expect("Failed to spawn worker thread")
            })
            .collect();

        // Drop the original sender so the channel disconnects once every
        // worker has exited.
        drop(result_tx);

        Self {
            num_workers,
            handles: Some(handles),
            result_rx,
            stop_flag,
            stats,
            start_time: Instant::now(),
        }
    }

    /// Waits for a worker report, a timeout, or pool exhaustion.
    pub fn wait(&self, timeout: Duration) -> PoolWait {
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => PoolWait::Result(result),
            Err(RecvTimeoutError::Timeout) => PoolWait::Timeout,
            Err(RecvTimeoutError::Disconnected) => PoolWait::Exhausted,
        }
    }

    /// Signals all workers to stop at their next iteration boundary.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops and joins every worker, returning the exact total attempt
    /// count (workers flush their counters before exiting).
    pub fn join(mut self) -> u64 {
        self.stop();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
        self.stats.total_keys()
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Total candidate keys tested so far across all workers.
    pub fn total_keys(&self) -> u64 {
        self.stats.total_keys()
    }

    /// Total matches found.
    pub fn total_matches(&self) -> u64 {
        self.stats.total_matches()
    }

    /// Elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Current scan rate in keys per second.
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_keys() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns a clone of the stop flag for external use (e.g. signal
    /// handlers).
    pub fn stop_flag_clone(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchMode;
    use crate::network::Network;

    // A one-symbol anywhere pattern matches most addresses when case
    // folded, so the pool finds it almost immediately.
    fn easy_pattern() -> Pattern {
        Pattern::new("a", MatchMode::Anywhere, false)
    }

    #[test]
    fn test_first_match_stops_the_pool() {
        let pool = WorkerPool::new(
            2,
            easy_pattern(),
            Network::Bitcoin.parameters(),
            [0x11; 32],
        );

        let result = loop {
            match pool.wait(Duration::from_millis(200)) {
                PoolWait::Result(r) => break r.expect("worker reported an error"),
                PoolWait::Timeout => continue,
                PoolWait::Exhausted => panic!("pool exhausted on an easy pattern"),
            }
        };

        assert!(result.address.contains('a') || result.address.contains('A'));
        assert!(result.worker_id < 2);
        let attempts = pool.join();
        assert!(attempts > 0);
    }

    #[test]
    fn test_found_key_reproduces_address() {
        let pool = WorkerPool::new(
            2,
            easy_pattern(),
            Network::Bitcoin.parameters(),
            [0x77; 32],
        );
        let result = loop {
            match pool.wait(Duration::from_millis(200)) {
                PoolWait::Result(r) => break r.expect("worker reported an error"),
                _ => continue,
            }
        };
        pool.join();

        let secret: [u8; 32] = hex::decode(&result.private_key)
            .unwrap()
            .try_into()
            .unwrap();
        let keypair = crate::crypto::KeyDeriver::new().derive(secret).unwrap();
        let address = crate::crypto::Address::derive(
            keypair.public_key(),
            &Network::Bitcoin.parameters(),
        )
        .unwrap();
        assert_eq!(address.to_string(), result.address);
        assert_eq!(
            keypair.to_wif(&Network::Bitcoin.parameters()).unwrap(),
            result.wif
        );
    }

    #[test]
    fn test_join_after_stop_is_prompt() {
        let pool = WorkerPool::new(
            2,
            // Effectively unfindable in a test run.
            Pattern::new("zzzzzzzzzz", MatchMode::Anchored, true),
            Network::Bitcoin.parameters(),
            [0x42; 32],
        );
        std::thread::sleep(Duration::from_millis(50));
        pool.stop();
        let attempts = pool.join();
        assert!(attempts > 0);
    }
}
