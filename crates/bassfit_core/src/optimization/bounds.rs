use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};

/// Lower and upper limits of each decision variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    #[must_use]
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Width of each dimension
    pub fn widths(&self) -> impl Iterator<Item = f64> + '_ {
        self.lower.iter().zip(&self.upper).map(|(lo, hi)| hi - lo)
    }

    /// Check the box is non-empty, finite and ordered
    pub fn validate(&self) -> Result<()> {
        if self.lower.len() != self.upper.len() {
            return Err(FitError::config(format!(
                "bounds have {} lower and {} upper limits",
                self.lower.len(),
                self.upper.len()
            )));
        }
        if self.lower.is_empty() {
            return Err(FitError::config("bounds have no dimensions"));
        }
        for (i, (lo, hi)) in self.lower.iter().zip(&self.upper).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(FitError::config(format!(
                    "bounds of dimension {i} are not finite"
                )));
            }
            if lo > hi {
                return Err(FitError::config(format!(
                    "lower bound {lo} exceeds upper bound {hi} in dimension {i}"
                )));
            }
        }
        Ok(())
    }

    /// Clamp values to bounds
    pub fn clamp(&self, values: &mut [f64]) {
        for ((val, lo), hi) in values.iter_mut().zip(&self.lower).zip(&self.upper) {
            *val = val.clamp(*lo, *hi);
        }
    }

    /// Draw a point uniformly from the box
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| lo + rng.random::<f64>() * (hi - lo))
            .collect()
    }

    /// Center of the box
    #[must_use]
    pub fn center(&self) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(lo, hi)| f64::midpoint(*lo, *hi))
            .collect()
    }
}
