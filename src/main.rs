//! Command-line entry point
//!
//! Takes a single positional argument naming a JSON configuration file, runs
//! the island-model search on Schwefel's function, writes snapshot frames
//! under `Results/` and the final population to `population.txt`, and prints
//! the best solution found.

use std::path::Path;
use std::process::ExitCode;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use archipelago::config::{Parameters, RunConfig};
use archipelago::engine::{snapshot, Search};
use archipelago::problem::Schwefel;

const POPULATION_FILE: &str = "population.txt";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("missing parameters.json file");
        return ExitCode::FAILURE;
    };
    if args.next().is_some() {
        eprintln!("too many arguments");
        return ExitCode::FAILURE;
    }

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &str) -> archipelago::Result<()> {
    let params = Parameters::from_json_file(config_path)?;
    let config = RunConfig::from_parameters(&params)?;
    let problem = Schwefel::from_parameters(&params)?;

    let outcome = Search::new(problem, config).run()?;

    // the result is already computed; failing to persist it is not fatal
    if let Err(err) = snapshot::write_population(Path::new(POPULATION_FILE), &outcome.population) {
        warn!(path = POPULATION_FILE, %err, "cannot write final population");
    }

    if let Some(best) = outcome.best() {
        println!("{}", best.summary());
    }
    Ok(())
}
