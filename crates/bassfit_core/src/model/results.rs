//! Fit result types
//!
//! Contains the per-zone fit record and the ordered collection that holds
//! them until the final table is written.

use serde::{Deserialize, Serialize};

use super::ids::ZoneId;
use super::params::BassParameters;

/// Optimal parameters for a single zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Zone the parameters belong to
    pub zone: ZoneId,

    /// Winning parameter vector
    pub parameters: BassParameters,

    /// Residual sum of squares at `parameters`
    pub objective_value: f64,

    /// Index of the island that produced the winner
    pub island: usize,

    /// Number of samples the zone was fitted on
    pub observations: usize,

    /// Objective evaluations across all islands
    pub evaluations: usize,
}

/// A zone whose fit failed while the run was allowed to continue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneFailure {
    pub zone: ZoneId,
    pub reason: String,
}

/// Fit results in zone processing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    /// Successfully fitted zones
    pub results: Vec<FitResult>,

    /// Zones without any positive-offset observation
    pub skipped: Vec<ZoneId>,

    /// Zones isolated by the skip-zone failure policy
    pub failed: Vec<ZoneFailure>,
}

impl ResultSet {
    /// Create an empty result set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: FitResult) {
        self.results.push(result);
    }

    pub fn record_skipped(&mut self, zone: ZoneId) {
        self.skipped.push(zone);
    }

    pub fn record_failure(&mut self, zone: ZoneId, reason: String) {
        self.failed.push(ZoneFailure { zone, reason });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Look up the result for a zone
    #[must_use]
    pub fn get(&self, zone: &str) -> Option<&FitResult> {
        self.results.iter().find(|r| r.zone.as_str() == zone)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FitResult> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a FitResult;
    type IntoIter = std::slice::Iter<'a, FitResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
