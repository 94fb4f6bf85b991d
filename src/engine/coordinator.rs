//! Search coordinator
//!
//! Owns the whole-population vector and the shared collaborators, spawns one
//! OS thread per island, and joins them. The join is the only cross-thread
//! ordering edge: after it, every worker's local slice has been written back
//! into the population vector and the snapshot ledger holds every recorded
//! frame, so flushing and result publishing are plain sequential code.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::engine::migration::MigrationPool;
use crate::engine::snapshot::SnapshotLedger;
use crate::engine::worker::IslandWorker;
use crate::engine::EvalBudget;
use crate::error::SearchError;
use crate::population::individual::{best_of, Individual};
use crate::problem::Problem;

/// Default directory for snapshot frames
pub const DEFAULT_SNAPSHOT_DIR: &str = "Results";

/// Final state of a completed run
#[derive(Debug)]
pub struct SearchOutcome<G: crate::genome::Genome> {
    /// The whole population after all workers drained
    pub population: Vec<Individual<G>>,
    /// Total objective evaluations (initial population plus all workers)
    pub evaluations: u64,
    /// Total migration exchanges across all workers
    pub migrations: u64,
    /// Individuals left in the migration pool at the end of the run
    pub pool_leftover: Vec<Individual<G>>,
    /// Snapshot files written at flush
    pub snapshot_files: Vec<PathBuf>,
}

impl<G: crate::genome::Genome> SearchOutcome<G> {
    /// The best individual of the final population
    pub fn best(&self) -> Option<&Individual<G>> {
        best_of(&self.population)
    }
}

/// A configured search over a problem
pub struct Search<P: Problem> {
    problem: Arc<P>,
    config: RunConfig,
    snapshot_dir: PathBuf,
}

impl<P: Problem> Search<P> {
    /// Create a search with the default snapshot directory
    pub fn new(problem: P, config: RunConfig) -> Self {
        Self {
            problem: Arc::new(problem),
            config,
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
        }
    }

    /// Override the snapshot directory
    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }

    /// The validated configuration this search runs with
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the search to completion.
    ///
    /// Builds the initial population, partitions it into contiguous slices,
    /// evolves each slice on its own thread, joins, writes locals back,
    /// flushes snapshots, and returns the final state.
    pub fn run(&self) -> Result<SearchOutcome<P::Genome>, SearchError> {
        let config = self.config;
        info!(
            population = config.population_size,
            workers = config.workers,
            iterations = config.max_iterations,
            "search starting"
        );

        let mut seed_rng = StdRng::from_entropy();
        let mut population = self
            .problem
            .initial_population(config.population_size, &mut seed_rng);
        if population.len() < config.population_size {
            return Err(SearchError::InitialPopulation {
                expected: config.population_size,
                actual: population.len(),
            });
        }
        population.truncate(config.population_size);

        let pool = Arc::new(MigrationPool::new());
        let ledger = Arc::new(SnapshotLedger::new(
            config.frame_count(),
            config.population_size,
            config.print_every,
        ));
        let budget = config.max_eval.map(|limit| {
            let budget = Arc::new(EvalBudget::new(limit, config.check_every));
            budget.record(config.population_size as u64);
            budget
        });

        let chunk = config.population_size / config.workers + 1;
        let mut handles = Vec::with_capacity(config.workers);
        for index in 0..config.workers {
            let (lo, hi) = slice_bounds(index, chunk, config.population_size);
            let worker = IslandWorker::new(
                index,
                lo,
                population[lo..hi].to_vec(),
                Arc::clone(&self.problem),
                config,
                Arc::clone(&pool),
                Arc::clone(&ledger),
                budget.clone(),
            );
            handles.push(thread::spawn(move || worker.run(StdRng::from_entropy())));
        }

        // the initial population was evaluated once per individual
        let mut evaluations = config.population_size as u64;
        let mut migrations = 0;
        for (index, handle) in handles.into_iter().enumerate() {
            let report = handle
                .join()
                .map_err(|_| SearchError::WorkerPanicked { worker: index })?;
            debug!(
                worker = report.worker,
                iterations = report.iterations,
                evaluations = report.evaluations,
                "worker drained"
            );
            evaluations += report.evaluations;
            migrations += report.migrations;
            let offset = report.offset;
            for (i, individual) in report.local.into_iter().enumerate() {
                population[offset + i] = individual;
            }
        }

        let snapshot_files = ledger.flush(&self.snapshot_dir);
        let pool_leftover = pool.drain();
        info!(evaluations, migrations, "search complete");

        Ok(SearchOutcome {
            population,
            evaluations,
            migrations,
            pool_leftover,
            snapshot_files,
        })
    }
}

/// Bounds of worker `index`'s slice, clamped to the population
fn slice_bounds(index: usize, chunk: usize, population_size: usize) -> (usize, usize) {
    let lo = (index * chunk).min(population_size);
    let hi = ((index + 1) * chunk).min(population_size);
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{keys, Parameters};
    use crate::genome::bounds::Bounds;
    use crate::genome::traits::Genome;
    use crate::problem::schwefel::Schwefel;
    use std::fs;
    use tempfile::tempdir;

    fn parameters(population: f64, workers: f64, iterations: f64) -> Parameters {
        Parameters::new()
            .with(keys::POPULATION_SIZE, population)
            .with(keys::NUMBER_OF_THREADS, workers)
            .with(keys::MAX_ITERATIONS, iterations)
            .with(keys::SELECTION_PRESSURE, 1.5)
            .with(keys::BREEDING_VARIANCE_SCALE, 0.1)
            .with(keys::MIN_XI, -500.0)
            .with(keys::MAX_XI, 500.0)
            .with(keys::SWAP_POPULATION_EVERY, 10.0)
            .with(keys::PRINT_EVERY, 50.0)
    }

    fn search_from(params: &Parameters) -> Search<Schwefel> {
        let config = RunConfig::from_parameters(params).unwrap();
        let problem = Schwefel::from_parameters(params).unwrap();
        Search::new(problem, config)
    }

    #[test]
    fn test_slice_bounds_partition_covers_population() {
        for &(population, workers) in &[(100, 4), (10, 3), (7, 7), (3, 8), (1, 1)] {
            let chunk = population / workers + 1;
            let mut covered = 0;
            let mut next_expected = 0;
            for w in 0..workers {
                let (lo, hi) = slice_bounds(w, chunk, population);
                assert_eq!(lo, next_expected.min(population));
                assert!(hi >= lo);
                covered += hi - lo;
                next_expected = (w + 1) * chunk;
            }
            assert_eq!(covered, population, "P={population} W={workers}");
        }
    }

    #[test]
    fn test_run_produces_snapshots_and_final_population() {
        let dir = tempdir().unwrap();
        let params = parameters(40.0, 4.0, 200.0);
        let search = search_from(&params).with_snapshot_dir(dir.path().join("Results"));
        let bounds = Bounds::new(-500.0, 500.0);

        let outcome = search.run().unwrap();

        assert_eq!(outcome.population.len(), 40);
        for individual in &outcome.population {
            assert!(bounds.contains_all(individual.genome().genes()));
            assert!(individual.objective().is_finite());
        }
        // initial population plus worker breeding
        assert!(outcome.evaluations >= 40);
        assert!(outcome.pool_leftover.len() <= 1);

        // 200 iterations / print every 50 = 4 frames
        assert_eq!(outcome.snapshot_files.len(), 4);
        for n in [50, 100, 150, 200] {
            let path = dir.path().join("Results").join(format!("iter{n}.txt"));
            let text = fs::read_to_string(&path).unwrap();
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines.len(), 40, "{}", path.display());
            for line in lines {
                let fields: Vec<f64> = line
                    .split(", ")
                    .map(|field| field.parse().unwrap())
                    .collect();
                assert_eq!(fields.len(), 3);
            }
        }

        // the best of the final population is almost surely negative after
        // 200 iterations of minimization
        assert!(outcome.best().unwrap().objective() < 0.0);
    }

    #[test]
    fn test_run_zero_iterations_keeps_initial_population() {
        let dir = tempdir().unwrap();
        let params = parameters(30.0, 4.0, 0.0);
        let search = search_from(&params).with_snapshot_dir(dir.path().join("Results"));

        let outcome = search.run().unwrap();

        assert_eq!(outcome.population.len(), 30);
        assert_eq!(outcome.evaluations, 30);
        assert_eq!(outcome.migrations, 0);
        assert!(outcome.snapshot_files.is_empty());
        assert!(!dir.path().join("Results").exists());
    }

    #[test]
    fn test_run_more_workers_than_population() {
        let dir = tempdir().unwrap();
        let params = parameters(3.0, 8.0, 100.0);
        let search = search_from(&params).with_snapshot_dir(dir.path().join("Results"));

        let outcome = search.run().unwrap();

        assert_eq!(outcome.population.len(), 3);
        // every frame still carries the whole population
        for n in [50, 100] {
            let path = dir.path().join("Results").join(format!("iter{n}.txt"));
            let text = fs::read_to_string(&path).unwrap();
            assert_eq!(text.lines().count(), 3);
        }
    }

    #[test]
    fn test_run_single_worker_needs_no_migration_partner() {
        let dir = tempdir().unwrap();
        let params = parameters(20.0, 1.0, 100.0);
        let search = search_from(&params).with_snapshot_dir(dir.path().join("Results"));

        let outcome = search.run().unwrap();

        assert_eq!(outcome.population.len(), 20);
        // the pool was only ever touched by one worker; a single resident or
        // nothing at all are both legal
        assert!(outcome.pool_leftover.len() <= 1);
    }

    #[test]
    fn test_run_frequent_migration_stress() {
        let dir = tempdir().unwrap();
        let params = parameters(200.0, 8.0, 200.0)
            .with(keys::SWAP_POPULATION_EVERY, 1.0)
            .with(keys::PRINT_EVERY, 100.0);
        let search = search_from(&params).with_snapshot_dir(dir.path().join("Results"));

        let outcome = search.run().unwrap();

        assert_eq!(outcome.population.len(), 200);
        // 8 workers x 200 iterations, one exchange each
        assert_eq!(outcome.migrations, 8 * 200);
    }

    #[test]
    fn test_run_respects_evaluation_budget() {
        let dir = tempdir().unwrap();
        let params = parameters(20.0, 2.0, 100_000.0)
            .with(keys::MAX_EVAL, 500.0)
            .with(keys::CHECK_TERMINATION_EVERY, 5.0);
        let search = search_from(&params).with_snapshot_dir(dir.path().join("Results"));

        // terminates long before the iteration budget
        let outcome = search.run().unwrap();
        assert_eq!(outcome.population.len(), 20);
    }
}
