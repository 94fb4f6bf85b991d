//! Error types for archipelago
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for configuration problems
///
/// Configuration errors are startup errors: they are reported before any
/// worker is spawned and the process exits non-zero. None of them is
/// recoverable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not a JSON object of numeric values
    #[error("cannot parse configuration: {0}")]
    Parse(String),

    /// A required key is absent from the configuration map
    #[error("missing required configuration key `{0}`")]
    MissingKey(String),

    /// A key is present but its value is unusable
    #[error("invalid value {value} for configuration key `{key}`: {reason}")]
    InvalidValue {
        key: String,
        value: f64,
        reason: &'static str,
    },
}

/// Error type for search execution
#[derive(Debug, Error)]
pub enum SearchError {
    /// The problem produced fewer initial individuals than requested
    #[error("initial population too small: expected {expected}, got {actual}")]
    InitialPopulation { expected: usize, actual: usize },

    /// A worker thread panicked before draining its local population
    #[error("island worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Search error
    #[error("search error: {0}")]
    Search(#[from] SearchError),
}

/// Result type alias for archipelago operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingKey("population size".to_string());
        assert_eq!(
            err.to_string(),
            "missing required configuration key `population size`"
        );

        let err = ConfigError::InvalidValue {
            key: "number of Threads".to_string(),
            value: 0.0,
            reason: "must be at least 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid value 0 for configuration key `number of Threads`: must be at least 1"
        );
    }

    #[test]
    fn test_search_error_display() {
        let err = SearchError::InitialPopulation {
            expected: 100,
            actual: 60,
        };
        assert_eq!(
            err.to_string(),
            "initial population too small: expected 100, got 60"
        );

        let err = SearchError::WorkerPanicked { worker: 3 };
        assert_eq!(err.to_string(), "island worker 3 panicked");
    }

    #[test]
    fn test_error_from_config_error() {
        let config_err = ConfigError::Parse("not an object".to_string());
        let err: Error = config_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
