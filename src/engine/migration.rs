//! Migration pool
//!
//! The shared exchange buffer that carries genetic material between islands.
//! A worker visits the pool once per migration period: it picks a random
//! individual from its local population and, under a single mutex, either
//! deposits a copy (pool empty) or swaps it with a random pool resident.
//! The critical section is O(1); workers never block each other outside it,
//! and no barrier or watcher thread is involved.
//!
//! The pool is an unordered bag. A swapped-out individual may transiently
//! exist in two local populations; that is acceptable because each worker
//! independently mutates its copy from then on.

use std::sync::{Mutex, PoisonError};

use rand::Rng;

use crate::genome::traits::Genome;
use crate::population::individual::Individual;

/// What a call to [`MigrationPool::exchange`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    /// The pool was empty; a copy of the local individual was deposited
    Deposited,
    /// The local individual was swapped with a pool resident
    Swapped,
    /// The local population was empty; nothing happened
    Skipped,
}

/// Shared, mutex-guarded exchange buffer
#[derive(Debug, Default)]
pub struct MigrationPool<G: Genome> {
    pool: Mutex<Vec<Individual<G>>>,
}

impl<G: Genome> MigrationPool<G> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            pool: Mutex::new(Vec::new()),
        }
    }

    /// Perform one migration exchange against `local`
    pub fn exchange<R: Rng>(&self, local: &mut [Individual<G>], rng: &mut R) -> Exchange {
        if local.is_empty() {
            return Exchange::Skipped;
        }
        let chosen = rng.gen_range(0..local.len());

        let mut pool = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        if pool.is_empty() {
            pool.push(local[chosen].clone());
            Exchange::Deposited
        } else {
            let resident = rng.gen_range(0..pool.len());
            std::mem::swap(&mut local[chosen], &mut pool[resident]);
            Exchange::Swapped
        }
    }

    /// Number of individuals currently in the pool
    pub fn len(&self) -> usize {
        self.pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the pool, returning its residents
    pub fn drain(&self) -> Vec<Individual<G>> {
        let mut pool = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pool)
    }
}
