//! Genome types
//!
//! Decision-variable representations for bounded continuous search spaces.

pub mod bounds;
pub mod real_vector;
pub mod traits;

pub use bounds::Bounds;
pub use real_vector::RealVector;
pub use traits::Genome;
