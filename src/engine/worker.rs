//! Island worker
//!
//! One worker evolves one contiguous slice of the population. It operates on
//! a private copy for the whole run: no other thread reads or writes it.
//! Shared state is touched only at the migration pool (once per migration
//! period, one short lock) and the snapshot ledger (once per snapshot period,
//! one per-frame lock). The local population travels back to the coordinator
//! in the returned [`WorkerReport`].

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use crate::config::RunConfig;
use crate::engine::migration::MigrationPool;
use crate::engine::snapshot::SnapshotLedger;
use crate::engine::EvalBudget;
use crate::population::individual::Individual;
use crate::problem::Problem;

/// What a worker hands back through its join handle
#[derive(Debug)]
pub struct WorkerReport<G: crate::genome::Genome> {
    /// Worker index
    pub worker: usize,
    /// Start of the owned slice in the whole-population vector
    pub offset: usize,
    /// The evolved local population
    pub local: Vec<Individual<G>>,
    /// Iterations actually run (shorter than the budget only when the
    /// evaluation budget is exhausted)
    pub iterations: usize,
    /// Objective evaluations performed by this worker
    pub evaluations: u64,
    /// Migration exchanges performed
    pub migrations: u64,
}

/// A single island: one worker thread's state
pub struct IslandWorker<P: Problem> {
    index: usize,
    offset: usize,
    local: Vec<Individual<P::Genome>>,
    problem: Arc<P>,
    config: RunConfig,
    pool: Arc<MigrationPool<P::Genome>>,
    ledger: Arc<SnapshotLedger<P::Genome>>,
    budget: Option<Arc<EvalBudget>>,
}

impl<P: Problem> IslandWorker<P> {
    /// Create a worker over the slice `[offset, offset + local.len())`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: usize,
        offset: usize,
        local: Vec<Individual<P::Genome>>,
        problem: Arc<P>,
        config: RunConfig,
        pool: Arc<MigrationPool<P::Genome>>,
        ledger: Arc<SnapshotLedger<P::Genome>>,
        budget: Option<Arc<EvalBudget>>,
    ) -> Self {
        Self {
            index,
            offset,
            local,
            problem,
            config,
            pool,
            ledger,
            budget,
        }
    }

    /// Run the evolutionary inner loop to completion.
    ///
    /// The loop terminates at `max_iterations` (or earlier when the optional
    /// evaluation budget trips). An empty parent set, and even an empty
    /// slice, are legal: the iteration still counts.
    pub fn run<R: Rng>(mut self, mut rng: R) -> WorkerReport<P::Genome> {
        debug!(
            worker = self.index,
            offset = self.offset,
            size = self.local.len(),
            "island worker started"
        );

        let mut evaluations: u64 = 0;
        let mut migrations: u64 = 0;
        let mut iterations = 0;

        for k in 1..=self.config.max_iterations {
            iterations = k;

            let mut selection =
                self.problem
                    .select_parents(&self.local, 0..self.local.len(), &mut rng);
            let len = self.local.len();
            if selection.parents.iter().any(|&idx| idx >= len) {
                debug_assert!(false, "parent index outside the local slice");
                warn!(
                    worker = self.index,
                    "dropping parent indices outside the local slice"
                );
                selection.parents.retain(|&idx| idx < len);
            }

            let children = self
                .problem
                .breed(&self.local, &selection.parents, &mut rng);
            evaluations += children.len() as u64;
            if let Some(budget) = &self.budget {
                budget.record(children.len() as u64);
            }
            self.problem
                .replace(&mut self.local, children, &selection.ranked);

            if k % self.config.swap_every == 0 {
                self.pool.exchange(&mut self.local, &mut rng);
                migrations += 1;
            }

            if k % self.config.print_every == 0 {
                let frame = k / self.config.print_every - 1;
                self.ledger.record(frame, self.offset, &self.local);
            }

            if let Some(budget) = &self.budget {
                if budget.poll(k) {
                    debug!(
                        worker = self.index,
                        iteration = k,
                        "evaluation budget exhausted"
                    );
                    break;
                }
            }
        }

        debug!(
            worker = self.index,
            iterations, evaluations, migrations, "island worker finished"
        );

        WorkerReport {
            worker: self.index,
            offset: self.offset,
            local: self.local,
            iterations,
            evaluations,
            migrations,
        }
    }
}
