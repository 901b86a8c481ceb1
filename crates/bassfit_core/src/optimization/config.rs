//! Optimization configuration types
//!
//! Defines the algorithms available to each island and the archipelago
//! sizing: islands, population, generations and the worker cap.

use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};

/// Algorithm run on every island
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AlgorithmKind {
    /// Constriction-factor particle swarm
    #[default]
    ParticleSwarm,

    /// Nelder-Mead simplex started from a random point
    NelderMead,
}

/// Neighbourhood used for the social term of the swarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Every particle follows the swarm-wide best
    Global,

    /// Particles follow the best of `neighbours` ring neighbours (half on
    /// each side)
    Ring { neighbours: usize },
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Ring { neighbours: 4 }
    }
}

/// Particle swarm coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoSettings {
    /// Constriction factor applied to the whole velocity update
    pub omega: f64,

    /// Cognitive (personal best) acceleration
    pub eta1: f64,

    /// Social (neighbourhood best) acceleration
    pub eta2: f64,

    /// Velocity cap as a fraction of each dimension's width
    pub max_velocity: f64,

    pub topology: Topology,

    /// Stop an island early once its best has not improved for this many
    /// generations
    pub stall_generations: Option<usize>,
}

impl Default for PsoSettings {
    fn default() -> Self {
        Self {
            omega: 0.7298,
            eta1: 2.05,
            eta2: 2.05,
            max_velocity: 0.5,
            topology: Topology::default(),
            stall_generations: None,
        }
    }
}

/// Complete configuration for an archipelago run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchipelagoConfig {
    /// Algorithm to use
    #[serde(default)]
    pub algorithm: AlgorithmKind,

    /// Number of independent islands
    #[serde(default = "default_islands")]
    pub islands: usize,

    /// Particles per island (ignored by Nelder-Mead)
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Generations per island (iteration cap for Nelder-Mead)
    #[serde(default = "default_generations")]
    pub generations: usize,

    /// Upper bound on concurrently running islands
    ///
    /// Stands for the number of simultaneously waited-on worker handles a
    /// platform tolerates; some systems cap this near 64.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Base seed; drawn from the OS when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Simplex size at which Nelder-Mead islands stop
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default)]
    pub pso: PsoSettings,
}

fn default_islands() -> usize {
    64
}

fn default_population_size() -> usize {
    2000
}

fn default_generations() -> usize {
    5000
}

fn default_max_workers() -> usize {
    60
}

fn default_tolerance() -> f64 {
    1e-10
}

impl Default for ArchipelagoConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::default(),
            islands: default_islands(),
            population_size: default_population_size(),
            generations: default_generations(),
            max_workers: default_max_workers(),
            seed: None,
            tolerance: default_tolerance(),
            pso: PsoSettings::default(),
        }
    }
}

impl ArchipelagoConfig {
    /// Worker threads actually used for a run
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.max_workers.min(self.islands).max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.islands == 0 {
            return Err(FitError::config("islands must be at least 1"));
        }
        if self.generations == 0 {
            return Err(FitError::config("generations must be at least 1"));
        }
        if self.max_workers == 0 {
            return Err(FitError::config("max_workers must be at least 1"));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(FitError::config("tolerance must be non-negative"));
        }
        if self.algorithm == AlgorithmKind::ParticleSwarm {
            if self.population_size < 2 {
                return Err(FitError::config(
                    "particle swarm needs a population of at least 2",
                ));
            }
            let pso = &self.pso;
            for (name, value) in [
                ("omega", pso.omega),
                ("eta1", pso.eta1),
                ("eta2", pso.eta2),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(FitError::config(format!(
                        "pso.{name} must be finite and non-negative"
                    )));
                }
            }
            if pso.max_velocity.is_nan() || pso.max_velocity <= 0.0 || pso.max_velocity > 1.0 {
                return Err(FitError::config("pso.max_velocity must be in (0, 1]"));
            }
            if let Topology::Ring { neighbours } = pso.topology
                && neighbours == 0
            {
                return Err(FitError::config("ring topology needs at least 1 neighbour"));
            }
        }
        Ok(())
    }
}
