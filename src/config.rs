//! Run configuration
//!
//! The optimizer is driven by a flat map from string keys to floating-point
//! values, loaded from a JSON object. [`Parameters`] is that map with typed
//! accessors; [`RunConfig`] is the validated engine-facing view of it.
//! Unknown keys are ignored so the same file can carry problem-specific
//! settings.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

/// Recognized configuration keys
pub mod keys {
    /// Total number of individuals across all islands
    pub const POPULATION_SIZE: &str = "population size";
    /// Number of worker threads (islands)
    pub const NUMBER_OF_THREADS: &str = "number of Threads";
    /// Per-worker iteration budget
    pub const MAX_ITERATIONS: &str = "max_iterations";
    /// Pressure `S` of linear rank selection
    pub const SELECTION_PRESSURE: &str = "selection pressure";
    /// Scalar multiplier on parent distance for the breeding sigma
    pub const BREEDING_VARIANCE_SCALE: &str = "Breeding Variance Scale";
    /// Lower box bound applied to every dimension
    pub const MIN_XI: &str = "min xi";
    /// Upper box bound applied to every dimension
    pub const MAX_XI: &str = "max xi";
    /// Migration period in iterations
    pub const SWAP_POPULATION_EVERY: &str = "swap population every";
    /// Snapshot period in iterations
    pub const PRINT_EVERY: &str = "print every";
    /// Optional global evaluation-count budget
    pub const MAX_EVAL: &str = "max_eval";
    /// Optional polling period for the evaluation budget
    pub const CHECK_TERMINATION_EVERY: &str = "check termination every";
    /// Optional problem dimensionality (defaults to 2)
    pub const DIMENSION: &str = "dimension";
}

/// The raw configuration map: string keys to scalar values.
///
/// Immutable for the lifetime of a run. Shared read-only with every
/// component that needs it.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    values: HashMap<String, f64>,
}

impl Parameters {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of numeric values
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let values: HashMap<String, f64> =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self { values })
    }

    /// Load parameters from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Set a key, consuming and returning self (builder style)
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Look up an optional key
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Look up a required key
    pub fn require(&self, key: &str) -> Result<f64, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// Look up a required key and convert it to a count.
    ///
    /// Fractional values are truncated; negative or non-finite values are
    /// rejected.
    pub fn require_usize(&self, key: &str) -> Result<usize, ConfigError> {
        let value = self.require(key)?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value,
                reason: "must be a non-negative finite number",
            });
        }
        Ok(value as usize)
    }

    /// Number of keys present
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validated engine configuration extracted from [`Parameters`].
///
/// Problem-specific keys (bounds, selection pressure, variance scale) are
/// validated by the problem that consumes them; this struct covers only what
/// the coordinator and workers need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Total population size `P`
    pub population_size: usize,
    /// Worker (island) count `W`
    pub workers: usize,
    /// Per-worker iteration budget
    pub max_iterations: usize,
    /// Migration period in iterations
    pub swap_every: usize,
    /// Snapshot period in iterations
    pub print_every: usize,
    /// Optional global evaluation budget
    pub max_eval: Option<u64>,
    /// Budget polling period in iterations
    pub check_every: usize,
}

impl RunConfig {
    /// Extract and validate the engine configuration
    pub fn from_parameters(params: &Parameters) -> Result<Self, ConfigError> {
        let population_size = require_positive(params, keys::POPULATION_SIZE)?;
        let workers = require_positive(params, keys::NUMBER_OF_THREADS)?;
        let max_iterations = params.require_usize(keys::MAX_ITERATIONS)?;
        let swap_every = require_positive(params, keys::SWAP_POPULATION_EVERY)?;
        let print_every = require_positive(params, keys::PRINT_EVERY)?;

        let max_eval = match params.get(keys::MAX_EVAL) {
            Some(value) if !value.is_finite() || value < 0.0 => {
                return Err(ConfigError::InvalidValue {
                    key: keys::MAX_EVAL.to_string(),
                    value,
                    reason: "must be a non-negative finite number",
                });
            }
            Some(value) => Some(value as u64),
            None => None,
        };
        let check_every = match params.get(keys::CHECK_TERMINATION_EVERY) {
            Some(value) if !value.is_finite() || value < 1.0 => {
                return Err(ConfigError::InvalidValue {
                    key: keys::CHECK_TERMINATION_EVERY.to_string(),
                    value,
                    reason: "must be at least 1",
                });
            }
            Some(value) => value as usize,
            None => 1,
        };

        Ok(Self {
            population_size,
            workers,
            max_iterations,
            swap_every,
            print_every,
            max_eval,
            check_every,
        })
    }

    /// Number of snapshot frames a full run produces
    pub fn frame_count(&self) -> usize {
        self.max_iterations / self.print_every
    }
}

fn require_positive(params: &Parameters, key: &str) -> Result<usize, ConfigError> {
    let value = params.require_usize(key)?;
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: 0.0,
            reason: "must be at least 1",
        });
    }
    Ok(value)
}
