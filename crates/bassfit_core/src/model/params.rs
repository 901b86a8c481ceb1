//! Bass model parameter vector and its search space

use serde::{Deserialize, Serialize};

use crate::optimization::Bounds;

/// Search interval shared by the innovation and imitation coefficients
pub const PROBABILITY_BOUNDS: (f64, f64) = (0.0, 1.0);

/// Search interval for the ultimate market size
pub const MARKET_SIZE_BOUNDS: (f64, f64) = (1.0, 100_000.0);

/// The three Bass diffusion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BassParameters {
    /// Innovation coefficient
    pub p: f64,
    /// Imitation coefficient
    pub q: f64,
    /// Ultimate market size
    pub m: f64,
}

impl BassParameters {
    #[must_use]
    pub fn new(p: f64, q: f64, m: f64) -> Self {
        Self { p, q, m }
    }

    /// Decision vector layout used by the optimizer: `[p, q, m]`
    #[must_use]
    pub fn to_vector(self) -> [f64; 3] {
        [self.p, self.q, self.m]
    }

    /// Build from an optimizer decision vector
    ///
    /// Returns `None` unless the slice has exactly three entries.
    #[must_use]
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [p, q, m] => Some(Self::new(*p, *q, *m)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.p.is_finite() && self.q.is_finite() && self.m.is_finite()
    }

    /// Whether the vector lies inside the fixed search space
    #[must_use]
    pub fn within_search_space(&self) -> bool {
        let in_range = |v: f64, (lo, hi): (f64, f64)| v >= lo && v <= hi;
        in_range(self.p, PROBABILITY_BOUNDS)
            && in_range(self.q, PROBABILITY_BOUNDS)
            && in_range(self.m, MARKET_SIZE_BOUNDS)
    }
}

/// Box bounds for `[p, q, m]`
#[must_use]
pub fn bass_bounds() -> Bounds {
    Bounds::new(
        vec![PROBABILITY_BOUNDS.0, PROBABILITY_BOUNDS.0, MARKET_SIZE_BOUNDS.0],
        vec![PROBABILITY_BOUNDS.1, PROBABILITY_BOUNDS.1, MARKET_SIZE_BOUNDS.1],
    )
}
