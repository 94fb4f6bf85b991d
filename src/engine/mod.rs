//! The concurrency core
//!
//! A run partitions the population into contiguous slices, one per worker
//! thread. Each worker evolves a private copy of its slice, trading
//! individuals through the shared [`MigrationPool`](migration::MigrationPool)
//! and recording periodic views into the
//! [`SnapshotLedger`](snapshot::SnapshotLedger). The
//! [`Search`](coordinator::Search) coordinator owns the whole-population
//! vector, spawns and joins the workers, and flushes snapshots to disk after
//! the join.
//!
//! There is no barrier inside the inner loop; the only cross-thread ordering
//! edge is the join itself.

pub mod coordinator;
pub mod migration;
pub mod snapshot;
pub mod worker;

pub use coordinator::{Search, SearchOutcome};
pub use migration::MigrationPool;
pub use snapshot::SnapshotLedger;
pub use worker::{IslandWorker, WorkerReport};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Optional global evaluation-count budget.
///
/// Workers add their objective evaluations as they go and poll the budget
/// between iterations. Once the budget is exhausted every worker observes the
/// flag and winds down; relaxed ordering suffices because the flag only ever
/// flips once and nothing is published through it.
#[derive(Debug)]
pub struct EvalBudget {
    limit: u64,
    check_every: usize,
    spent: AtomicU64,
    exhausted: AtomicBool,
}

impl EvalBudget {
    /// Create a budget of `limit` evaluations, polled every `check_every`
    /// iterations
    pub fn new(limit: u64, check_every: usize) -> Self {
        Self {
            limit,
            check_every: check_every.max(1),
            spent: AtomicU64::new(0),
            exhausted: AtomicBool::new(false),
        }
    }

    /// Record `count` evaluations
    pub fn record(&self, count: u64) {
        if count > 0 {
            self.spent.fetch_add(count, Ordering::Relaxed);
        }
    }

    /// Evaluations recorded so far
    pub fn spent(&self) -> u64 {
        self.spent.load(Ordering::Relaxed)
    }

    /// Check whether the budget is exhausted, re-counting only on polling
    /// iterations
    pub fn poll(&self, iteration: usize) -> bool {
        if self.exhausted.load(Ordering::Relaxed) {
            return true;
        }
        if iteration % self.check_every == 0 && self.spent() >= self.limit {
            self.exhausted.store(true, Ordering::Relaxed);
            return true;
        }
        false
    }
}
