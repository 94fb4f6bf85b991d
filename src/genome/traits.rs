//! Core genome trait

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// A solution representation the engine can carry across threads and
/// render into snapshot lines.
///
/// The engine itself never interprets genes; it only needs to clone
/// individuals between islands and write their decision variables to disk.
/// Everything semantic (initialization, selection, breeding, replacement)
/// lives behind [`Problem`](crate::problem::Problem).
pub trait Genome:
    Clone + Send + Sync + Debug + Serialize + DeserializeOwned + 'static
{
    /// Number of decision variables
    fn dimension(&self) -> usize;

    /// The decision variables as a slice
    fn genes(&self) -> &[f64];
}
