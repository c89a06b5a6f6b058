//! CPU-based search worker.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::crypto::{Address, KeyDeriver};
use crate::error::Error;
use crate::matcher::Pattern;
use crate::network::NetworkParameters;

use super::VanityResult;

/// Byte offset of the 64-bit scan window inside the 32-byte key buffer.
pub(crate) const WINDOW_OFFSET: usize = 24;

/// Attempts are added to the shared counter in batches of this size; the
/// remainder is flushed when the worker exits.
const FLUSH_INTERVAL: u64 = 1024;

/// A worker's private slice of private-key space.
///
/// The key buffer is the shared random seed with a big-endian 64-bit window
/// embedded in its low bytes. Each worker starts its window at a distinct
/// offset; the window is incremented per candidate. Workers never share key
/// material, so no locking is involved.
#[derive(Debug, Clone)]
pub struct SearchTask {
    key: [u8; 32],
    window: u64,
    attempts: u64,
}

impl SearchTask {
    /// Seeds a task: the shared random seed with the window set to
    /// `start_window`.
    pub fn new(seed: &[u8; 32], start_window: u64) -> Self {
        let mut key = *seed;
        key[WINDOW_OFFSET..].copy_from_slice(&start_window.to_be_bytes());
        Self {
            key,
            window: start_window,
            attempts: 0,
        }
    }

    /// The current candidate private key.
    #[inline]
    pub fn key_bytes(&self) -> &[u8; 32] {
        &self.key
    }

    /// Steps to the next candidate. Returns `false` once the window wraps
    /// to zero: the worker's region is exhausted (benign, and in practice
    /// unreachable within any realistic run).
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.window = self.window.wrapping_add(1);
        self.key[WINDOW_OFFSET..].copy_from_slice(&self.window.to_be_bytes());
        self.window != 0
    }

    #[inline]
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Attempts made so far by this task.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}

/// Statistics shared by all workers in a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total candidate keys tested
    pub keys_tested: AtomicU64,
    /// Matches found
    pub matches_found: AtomicU64,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_keys(&self) -> u64 {
        self.keys_tested.load(Ordering::Relaxed)
    }

    pub fn total_matches(&self) -> u64 {
        self.matches_found.load(Ordering::Relaxed)
    }
}

/// How a worker's scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanOutcome {
    /// This worker found the match and reported it.
    Found,
    /// The 64-bit window wrapped without a match.
    Exhausted,
    /// A sibling (or Ctrl-C) requested a stop.
    Stopped,
}

/// A CPU worker that scans its task's key stream against a pattern.
pub struct CpuWorker {
    id: usize,
    pattern: Pattern,
    network: NetworkParameters,
    task: SearchTask,
    result_tx: Sender<Result<VanityResult, Error>>,
    stop_flag: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
}

impl CpuWorker {
    pub fn new(
        id: usize,
        pattern: Pattern,
        network: NetworkParameters,
        task: SearchTask,
        result_tx: Sender<Result<VanityResult, Error>>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            pattern,
            network,
            task,
            result_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs the scan to completion.
    ///
    /// Derivation or encoding failures are fatal for the whole run: the
    /// error is forwarded over the result channel for the top-level handler
    /// and the stop flag is raised so siblings wind down too.
    pub fn run(mut self) {
        match self.scan() {
            Ok(_) => {}
            Err(e) => {
                self.stop_flag.store(true, Ordering::Relaxed);
                let _ = self.result_tx.send(Err(e));
            }
        }
    }

    fn scan(&mut self) -> Result<ScanOutcome, Error> {
        let deriver = KeyDeriver::new();
        let mut unflushed = 0u64;

        loop {
            // Relaxed is enough: correctness only needs the store to become
            // eventually visible, not any particular ordering.
            if self.stop_flag.load(Ordering::Relaxed) {
                self.flush(&mut unflushed);
                return Ok(ScanOutcome::Stopped);
            }

            let keypair = deriver.derive(*self.task.key_bytes())?;
            let address = Address::derive(keypair.public_key(), &self.network)?;
            self.task.record_attempt();
            unflushed += 1;
            if unflushed == FLUSH_INTERVAL {
                self.flush(&mut unflushed);
            }

            if self.pattern.matches(&address).is_match() {
                // First match wins; siblings observe the flag at their next
                // iteration boundary.
                self.stop_flag.store(true, Ordering::Relaxed);
                self.stats.matches_found.fetch_add(1, Ordering::Relaxed);
                self.flush(&mut unflushed);

                let result = VanityResult {
                    private_key: keypair.private_key_hex(),
                    wif: keypair.to_wif(&self.network)?,
                    address: address.to_string(),
                    worker_id: self.id,
                };
                let _ = self.result_tx.send(Ok(result));
                return Ok(ScanOutcome::Found);
            }

            if !self.task.advance() {
                self.flush(&mut unflushed);
                return Ok(ScanOutcome::Exhausted);
            }
        }
    }

    fn flush(&self, unflushed: &mut u64) {
        if *unflushed > 0 {
            self.stats.keys_tested.fetch_add(*unflushed, Ordering::Relaxed);
            *unflushed = 0;
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }
}
