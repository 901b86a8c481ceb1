//! Box-bounded global minimization
//!
//! This module provides a small pluggable optimizer: a [`Problem`] exposes
//! box bounds and a fitness function, and [`evolve`] searches it with an
//! archipelago of independent islands run in parallel. Each island runs the
//! configured algorithm (particle swarm or Nelder-Mead) from its own seed,
//! and the archipelago returns every island's champion.
//!
//! # Example
//!
//! ```ignore
//! use bassfit_core::optimization::{ArchipelagoConfig, evolve};
//!
//! let config = ArchipelagoConfig {
//!     islands: 8,
//!     population_size: 50,
//!     generations: 500,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let result = evolve(&problem, &config)?;
//! let best = result.best().expect("finite champion");
//! println!("f = {} at {:?}", best.objective_value, best.parameter_values);
//! ```

mod archipelago;
mod bounds;
mod config;
mod nelder_mead;
mod particle_swarm;
mod result;

pub use archipelago::{evolve, island_seeds};
pub use bounds::Bounds;
pub use config::{AlgorithmKind, ArchipelagoConfig, PsoSettings, Topology};
pub use nelder_mead::minimize_nelder_mead;
pub use particle_swarm::minimize_particle_swarm;
pub use result::{ArchipelagoResult, ConvergenceHistory, IslandChampion, TerminationReason};

/// A minimization problem over a box
///
/// Implementations are shared by reference across islands running on
/// different threads, so `fitness` must not rely on interior mutability.
pub trait Problem: Sync {
    /// Feasible region of the decision vector
    fn bounds(&self) -> &Bounds;

    /// Objective value of a decision vector; lower is better
    fn fitness(&self, x: &[f64]) -> f64;

    /// Number of decision variables
    fn dimension(&self) -> usize {
        self.bounds().dimension()
    }
}

/// `a` is a strict improvement over `b`; NaN never improves on anything
/// and anything non-NaN improves on NaN.
#[inline]
pub(crate) fn improves(a: f64, b: f64) -> bool {
    if a.is_nan() {
        false
    } else {
        b.is_nan() || a < b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improves_nan_handling() {
        assert!(improves(1.0, 2.0));
        assert!(!improves(2.0, 1.0));
        assert!(!improves(1.0, 1.0));
        assert!(improves(5.0, f64::NAN));
        assert!(!improves(f64::NAN, 5.0));
        assert!(!improves(f64::NAN, f64::NAN));
    }
}
