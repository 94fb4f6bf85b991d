//! Real-valued vector genome
//!
//! A fixed-length vector of real decision variables, the representation used
//! by bounded continuous objectives.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::genome::bounds::Bounds;
use crate::genome::traits::Genome;

/// Fixed-length real-valued vector genome
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RealVector {
    genes: Vec<f64>,
}

impl RealVector {
    /// Create a new real vector with the given genes
    pub fn new(genes: Vec<f64>) -> Self {
        Self { genes }
    }

    /// Draw a random vector uniformly inside the box
    pub fn generate<R: Rng>(rng: &mut R, bounds: Bounds, dimension: usize) -> Self {
        let genes = (0..dimension).map(|_| bounds.sample(rng)).collect();
        Self { genes }
    }

    /// Get a mutable slice of the genes
    pub fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// Get the underlying vector
    pub fn into_inner(self) -> Vec<f64> {
        self.genes
    }

    /// Euclidean distance to another vector.
    ///
    /// Trailing dimensions of the longer vector are ignored; callers keep
    /// dimensions consistent within a run.
    pub fn distance(&self, other: &Self) -> f64 {
        self.genes
            .iter()
            .zip(other.genes.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl Genome for RealVector {
    fn dimension(&self) -> usize {
        self.genes.len()
    }

    fn genes(&self) -> &[f64] {
        &self.genes
    }
}

impl std::ops::Index<usize> for RealVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl std::ops::IndexMut<usize> for RealVector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.genes[index]
    }
}

impl From<Vec<f64>> for RealVector {
    fn from(genes: Vec<f64>) -> Self {
        Self { genes }
    }
}

impl From<RealVector> for Vec<f64> {
    fn from(genome: RealVector) -> Self {
        genome.genes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_real_vector_new() {
        let v = RealVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.dimension(), 3);
        assert_eq!(v.genes(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_real_vector_generate_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let bounds = Bounds::new(-500.0, 500.0);

        for _ in 0..100 {
            let v = RealVector::generate(&mut rng, bounds, 6);
            assert_eq!(v.dimension(), 6);
            assert!(bounds.contains_all(v.genes()));
        }
    }

    #[test]
    fn test_real_vector_distance() {
        let v1 = RealVector::new(vec![0.0, 0.0]);
        let v2 = RealVector::new(vec![3.0, 4.0]);
        assert_relative_eq!(v1.distance(&v2), 5.0);
        assert_relative_eq!(v2.distance(&v1), 5.0);
        assert_relative_eq!(v1.distance(&v1), 0.0);
    }

    #[test]
    fn test_real_vector_indexing() {
        let mut v = RealVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(v[1], 2.0);

        v[1] = 42.0;
        assert_eq!(v[1], 42.0);
    }

    #[test]
    fn test_real_vector_serialization() {
        let v = RealVector::new(vec![1.0, 2.0, 3.0]);
        let serialized = serde_json::to_string(&v).unwrap();
        let deserialized: RealVector = serde_json::from_str(&serialized).unwrap();
        assert_eq!(v, deserialized);
    }
}
