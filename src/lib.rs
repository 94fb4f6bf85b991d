//! # archipelago
//!
//! A parallel island-model genetic algorithm for black-box, bounded,
//! real-valued objectives.
//!
//! The population is partitioned into contiguous slices, one per worker
//! thread. Each worker evolves a private copy of its slice for a fixed
//! iteration budget, periodically exchanging individuals with the other
//! islands through a shared migration pool and recording population
//! snapshots that are written to disk after the run. Problem-specific
//! behavior (initialization, selection, breeding, replacement) is injected
//! through the [`Problem`](problem::Problem) trait.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use archipelago::prelude::*;
//!
//! fn main() -> archipelago::Result<()> {
//!     let params = Parameters::from_json_file("parameters.json")?;
//!     let config = RunConfig::from_parameters(&params)?;
//!     let problem = Schwefel::from_parameters(&params)?;
//!
//!     let outcome = Search::new(problem, config).run()?;
//!     if let Some(best) = outcome.best() {
//!         println!("{}", best.summary());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: the string-to-float parameter map and validated run config
//! - [`genome`]: bounded real-vector solution representations
//! - [`population`]: the individual type (genome plus cached objective)
//! - [`problem`]: the [`Problem`](problem::Problem) trait and the Schwefel
//!   example problem
//! - [`engine`]: workers, migration pool, snapshot ledger, and the
//!   coordinator
//! - [`error`]: error taxonomy

pub mod config;
pub mod engine;
pub mod error;
pub mod genome;
pub mod population;
pub mod problem;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Parameters, RunConfig};
    pub use crate::engine::{MigrationPool, Search, SearchOutcome, SnapshotLedger};
    pub use crate::error::{ConfigError, Error, Result, SearchError};
    pub use crate::genome::{Bounds, Genome, RealVector};
    pub use crate::population::individual::best_of;
    pub use crate::population::Individual;
    pub use crate::problem::{Problem, Schwefel, Selection};
}
