//! Box bounds for genome values
//!
//! Every admitted individual satisfies `min <= x[i] <= max` in every
//! dimension. The box is uniform: one `[min, max]` interval applies to all
//! dimensions. Candidates are never clamped into the box; generation draws
//! uniformly inside it and breeding rejection-samples against it.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The inclusive interval `[min, max]` applied to every dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower edge of the box (inclusive)
    pub min: f64,
    /// Upper edge of the box (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Box spanning `[min, max]`
    ///
    /// # Panics
    /// Panics if the interval is inverted (min > max)
    pub fn new(min: f64, max: f64) -> Self {
        assert!(
            min <= max,
            "box bounds are inverted: min {} exceeds max {}",
            min,
            max
        );
        Self { min, max }
    }

    /// Box spanning `[-half_width, half_width]`
    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Width of the interval
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Whether a single coordinate lies inside the box
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether every coordinate of a vector lies inside the box
    pub fn contains_all(&self, values: &[f64]) -> bool {
        values.iter().all(|&v| self.contains(v))
    }

    /// Draw one coordinate uniformly inside the box
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}
