//! Optimization result types
//!
//! Contains types for tracking island progress and the archipelago outcome.

use serde::{Deserialize, Serialize};

use super::improves;

/// Best objective value seen after each generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvergenceHistory {
    /// Best objective value at each generation (monotonically non-increasing
    /// once finite)
    pub best_values: Vec<f64>,
}

impl ConvergenceHistory {
    /// Create a new empty convergence history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the best value of a generation
    pub fn record(&mut self, value: f64) {
        let current_best = self.best_values.last().copied().unwrap_or(f64::NAN);
        let new_best = if improves(value, current_best) {
            value
        } else {
            current_best
        };
        self.best_values.push(new_best);
    }

    #[must_use]
    pub fn generations(&self) -> usize {
        self.best_values.len()
    }

    #[must_use]
    pub fn final_best(&self) -> Option<f64> {
        self.best_values.last().copied()
    }
}

/// Reason why an island stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Ran every configured generation
    GenerationLimit,

    /// Best value stopped improving (swarm stall or simplex collapse)
    Converged,
}

/// Best point found by one island
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IslandChampion {
    /// Position of the island in the archipelago
    pub island: usize,

    /// Seed the island was started from
    pub seed: u64,

    /// Decision vector of the champion
    pub parameter_values: Vec<f64>,

    /// Objective value of the champion
    pub objective_value: f64,

    /// Fitness evaluations spent by the island
    pub evaluations: usize,

    /// Why the island stopped
    pub termination_reason: TerminationReason,

    pub history: ConvergenceHistory,
}

/// Champions of every island, in island order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchipelagoResult {
    /// Base seed the island seeds were derived from
    pub seed: u64,

    pub champions: Vec<IslandChampion>,
}

impl ArchipelagoResult {
    /// Champion with the lowest objective value
    ///
    /// Ties go to the island that comes first; NaN champions never win.
    /// Returns `None` when no island has a non-NaN objective.
    #[must_use]
    pub fn best(&self) -> Option<&IslandChampion> {
        let mut best: Option<&IslandChampion> = None;
        for champion in &self.champions {
            if champion.objective_value.is_nan() {
                continue;
            }
            match best {
                Some(current) if !improves(champion.objective_value, current.objective_value) => {}
                _ => best = Some(champion),
            }
        }
        best
    }

    /// Fitness evaluations across all islands
    #[must_use]
    pub fn total_evaluations(&self) -> usize {
        self.champions.iter().map(|c| c.evaluations).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn champion(island: usize, value: f64) -> IslandChampion {
        IslandChampion {
            island,
            seed: island as u64,
            parameter_values: vec![island as f64],
            objective_value: value,
            evaluations: 10,
            termination_reason: TerminationReason::GenerationLimit,
            history: ConvergenceHistory::new(),
        }
    }

    #[test]
    fn test_best_picks_minimum() {
        let result = ArchipelagoResult {
            seed: 0,
            champions: vec![champion(0, 3.0), champion(1, 1.0), champion(2, 2.0)],
        };
        assert_eq!(result.best().unwrap().island, 1);
        assert_eq!(result.total_evaluations(), 30);
    }

    #[test]
    fn test_best_tie_goes_to_first_island() {
        let result = ArchipelagoResult {
            seed: 0,
            champions: vec![champion(0, 5.0), champion(1, 1.0), champion(2, 1.0)],
        };
        assert_eq!(result.best().unwrap().island, 1);
    }

    #[test]
    fn test_best_skips_nan() {
        let result = ArchipelagoResult {
            seed: 0,
            champions: vec![champion(0, f64::NAN), champion(1, 7.0)],
        };
        assert_eq!(result.best().unwrap().island, 1);

        let all_nan = ArchipelagoResult {
            seed: 0,
            champions: vec![champion(0, f64::NAN)],
        };
        assert!(all_nan.best().is_none());
    }

    #[test]
    fn test_history_is_monotone() {
        let mut history = ConvergenceHistory::new();
        history.record(f64::NAN);
        history.record(5.0);
        history.record(7.0);
        history.record(2.0);
        history.record(f64::NAN);

        assert!(history.best_values[0].is_nan());
        assert_eq!(&history.best_values[1..], &[5.0, 5.0, 2.0, 2.0]);
        assert_eq!(history.generations(), 5);
        assert_eq!(history.final_best(), Some(2.0));
    }
}
