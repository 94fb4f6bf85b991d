//! Schwefel's function as an optimization problem
//!
//! The example collaborator: minimize `f(x) = -sum(x_i * sin(sqrt(|x_i|)))`
//! over the box `[min xi, max xi]^D`. Highly multimodal; for D = 2 on
//! `[-500, 500]` the global optimum sits near `(420.97, 420.97)` with
//! `f ~ -837.97`.
//!
//! Parent choice is linear rank selection with configurable pressure, and
//! children are drawn from per-dimension Gaussians whose spread scales with
//! the distance between the paired parents, rejection-sampled into the box.

use std::cmp::Ordering;
use std::ops::Range;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::{keys, Parameters};
use crate::error::ConfigError;
use crate::genome::bounds::Bounds;
use crate::genome::real_vector::RealVector;
use crate::genome::traits::Genome;
use crate::population::individual::Individual;
use crate::problem::{Problem, RankedIndex, Selection};

/// Schwefel's function over a uniform box
#[derive(Debug, Clone)]
pub struct Schwefel {
    dimension: usize,
    bounds: Bounds,
    selection_pressure: f64,
    variance_scale: f64,
}

impl Schwefel {
    /// Dimensionality used when the configuration does not say otherwise
    pub const DEFAULT_DIMENSION: usize = 2;

    /// Create a new problem instance
    ///
    /// # Panics
    /// Panics if the selection pressure is below 1 or the variance scale is
    /// negative.
    pub fn new(
        dimension: usize,
        bounds: Bounds,
        selection_pressure: f64,
        variance_scale: f64,
    ) -> Self {
        assert!(
            selection_pressure >= 1.0,
            "Selection pressure must be at least 1"
        );
        assert!(
            variance_scale >= 0.0,
            "Breeding variance scale must be non-negative"
        );
        Self {
            dimension,
            bounds,
            selection_pressure,
            variance_scale,
        }
    }

    /// Build the problem from the configuration map
    pub fn from_parameters(params: &Parameters) -> Result<Self, ConfigError> {
        let min = params.require(keys::MIN_XI)?;
        let max = params.require(keys::MAX_XI)?;
        if min > max {
            return Err(ConfigError::InvalidValue {
                key: keys::MIN_XI.to_string(),
                value: min,
                reason: "lower bound exceeds `max xi`",
            });
        }

        let selection_pressure = params.require(keys::SELECTION_PRESSURE)?;
        if !(selection_pressure >= 1.0) {
            return Err(ConfigError::InvalidValue {
                key: keys::SELECTION_PRESSURE.to_string(),
                value: selection_pressure,
                reason: "must be at least 1",
            });
        }

        let variance_scale = params.require(keys::BREEDING_VARIANCE_SCALE)?;
        if !(variance_scale >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: keys::BREEDING_VARIANCE_SCALE.to_string(),
                value: variance_scale,
                reason: "must be non-negative",
            });
        }

        let dimension = match params.get(keys::DIMENSION) {
            Some(value) if !value.is_finite() || value < 1.0 => {
                return Err(ConfigError::InvalidValue {
                    key: keys::DIMENSION.to_string(),
                    value,
                    reason: "must be at least 1",
                });
            }
            Some(value) => value as usize,
            None => Self::DEFAULT_DIMENSION,
        };

        Ok(Self::new(
            dimension,
            Bounds::new(min, max),
            selection_pressure,
            variance_scale,
        ))
    }

    /// The search box
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Problem dimensionality
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Evaluate Schwefel's function.
    ///
    /// A point outside the box evaluates to `+inf` so that selection reliably
    /// de-prioritizes it.
    pub fn objective(&self, x: &[f64]) -> f64 {
        let mut total = 0.0;
        for &xi in x {
            if !self.bounds.contains(xi) {
                return f64::INFINITY;
            }
            total -= xi * xi.abs().sqrt().sin();
        }
        total
    }

    fn evaluated(&self, genome: RealVector) -> Individual<RealVector> {
        let objective = self.objective(genome.genes());
        Individual::new(genome, objective)
    }
}

impl Problem for Schwefel {
    type Genome = RealVector;

    fn initial_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Individual<RealVector>> {
        (0..size)
            .map(|_| self.evaluated(RealVector::generate(rng, self.bounds, self.dimension)))
            .collect()
    }

    /// Linear rank selection: with `N` candidates sorted ascending by
    /// objective and ranks `R` in `[1, N]`, rank `R` is admitted with
    /// probability `(S*(N + 1 - 2R) + 2*(R - 1)) / (N*(N - 1))`.
    fn select_parents<R: Rng>(
        &self,
        population: &[Individual<RealVector>],
        range: Range<usize>,
        rng: &mut R,
    ) -> Selection {
        let lo = range.start.min(population.len());
        let hi = range.end.min(population.len());

        let mut ranked: Vec<RankedIndex> = (lo..hi)
            .map(|index| RankedIndex {
                objective: population[index].objective(),
                index,
            })
            .collect();
        // stable sort keeps ties in current index order
        ranked.sort_by(|a, b| {
            a.objective
                .partial_cmp(&b.objective)
                .unwrap_or(Ordering::Equal)
        });

        let n = ranked.len();
        let mut parents = Vec::new();
        if n >= 2 {
            let nf = n as f64;
            let s = self.selection_pressure;
            for (position, entry) in ranked.iter().enumerate() {
                let rank = (position + 1) as f64;
                let accept = (s * (nf + 1.0 - 2.0 * rank) + 2.0 * (rank - 1.0)) / (nf * (nf - 1.0));
                if rng.gen::<f64>() < accept {
                    parents.push(entry.index);
                }
            }
        }

        Selection { parents, ranked }
    }

    /// Each parent pairs with a distinct random mate from the parent set;
    /// each child coordinate is drawn from `Normal(parent_x_d, sigma)` with
    /// `sigma = scale * ||parent - mate||`, redrawing any coordinate that
    /// lands outside the box.
    fn breed<R: Rng>(
        &self,
        population: &[Individual<RealVector>],
        parents: &[usize],
        rng: &mut R,
    ) -> Vec<Individual<RealVector>> {
        if parents.len() < 2 {
            return Vec::new();
        }

        let mut children = Vec::with_capacity(parents.len());
        for (i, &parent_idx) in parents.iter().enumerate() {
            let mut mate = i;
            while mate == i {
                mate = rng.gen_range(0..parents.len());
            }

            let parent = &population[parent_idx];
            let other = &population[parents[mate]];
            let sigma = self.variance_scale * parent.genome().distance(other.genome());
            let noise = match Normal::new(0.0, sigma) {
                Ok(dist) => dist,
                Err(_) => continue,
            };

            let mut genes = Vec::with_capacity(parent.genome().dimension());
            for d in 0..parent.genome().dimension() {
                let center = parent.genome()[d];
                // the parent is interior to the box, so this terminates
                let mut x = center + noise.sample(rng);
                while !self.bounds.contains(x) {
                    x = center + noise.sample(rng);
                }
                genes.push(x);
            }
            children.push(self.evaluated(RealVector::new(genes)));
        }
        children
    }

    fn replace(
        &self,
        population: &mut [Individual<RealVector>],
        children: Vec<Individual<RealVector>>,
        ranked: &[RankedIndex],
    ) {
        let n = ranked.len();
        for (i, child) in children.into_iter().enumerate() {
            if i >= n {
                break;
            }
            let target = ranked[n - 1 - i].index;
            if let Some(slot) = population.get_mut(target) {
                *slot = child;
            }
        }
    }
}
