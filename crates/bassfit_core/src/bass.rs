//! Bass diffusion objective
//!
//! The predicted adoption for period `x` is the market size scaled by the
//! difference of a stabilized closed-form cumulative fraction evaluated one
//! period ahead and one period behind:
//!
//! ```text
//! ratio  = (1 - (p + q)) / (1 + (p + q) + EPS)
//! F(t)   = (1 - ratio^t / 2) / (1 + q / (p + EPS) * ratio^t / 2)
//! pred   = m * (F(x + 1) - F(x - 1))
//! ```
//!
//! Everything here is a pure function of its inputs and performs no
//! allocation, so the optimizer may call it from many threads at once.

use crate::model::{BassParameters, ObservationSeries};
use crate::optimization::{Bounds, Problem};

/// Additive stabilizer for the `p + q -> -1` and `p -> 0` divisions
pub const EPS: f64 = 1e-10;

/// Geometric ratio of the surrogate for a given `p + q`
#[inline]
fn ratio(p: f64, q: f64) -> f64 {
    (1.0 - (p + q)) / (1.0 + (p + q) + EPS)
}

/// Surrogate cumulative fraction from a precomputed ratio and `q / p_safe`
#[inline]
fn fraction(ratio: f64, q_over_p: f64, t: f64) -> f64 {
    let half_power = ratio.powf(t) / 2.0;
    (1.0 - half_power) / (1.0 + q_over_p * half_power)
}

/// Stabilized Bass cumulative fraction `F(t)`
#[must_use]
#[inline]
pub fn surrogate_fraction(params: &BassParameters, t: f64) -> f64 {
    fraction(ratio(params.p, params.q), params.q / (params.p + EPS), t)
}

/// Predicted adoption at period offset `x`
#[must_use]
#[inline]
pub fn predict(params: &BassParameters, x: f64) -> f64 {
    let r = ratio(params.p, params.q);
    let q_over_p = params.q / (params.p + EPS);
    params.m * (fraction(r, q_over_p, x + 1.0) - fraction(r, q_over_p, x - 1.0))
}

/// Residual sum of squares of the decision vector `[p, q, m]`
///
/// `offsets` and `values` are parallel arrays; extra entries of the longer
/// slice are ignored. Callers must not pass an empty series.
#[must_use]
#[inline]
pub fn residual_sum_of_squares(dv: &[f64; 3], offsets: &[f64], values: &[f64]) -> f64 {
    let [p, q, m] = *dv;
    let r = ratio(p, q);
    let q_over_p = q / (p + EPS);

    let mut rss = 0.0;
    for (&x, &y) in offsets.iter().zip(values) {
        let pred = m * (fraction(r, q_over_p, x + 1.0) - fraction(r, q_over_p, x - 1.0));
        let diff = y - pred;
        rss += diff * diff;
    }
    rss
}

/// Residual sum of squares of `params` against a zone's series
#[must_use]
pub fn objective(params: &BassParameters, series: &ObservationSeries) -> f64 {
    residual_sum_of_squares(&params.to_vector(), series.offsets(), series.values())
}

/// Bass fitting problem for one zone, borrowing the zone's series
#[derive(Debug, Clone)]
pub struct BassProblem<'a> {
    series: &'a ObservationSeries,
    bounds: Bounds,
}

impl<'a> BassProblem<'a> {
    /// Problem over the fixed `[p, q, m]` search space
    #[must_use]
    pub fn new(series: &'a ObservationSeries) -> Self {
        Self {
            series,
            bounds: crate::model::bass_bounds(),
        }
    }

    #[must_use]
    pub fn series(&self) -> &ObservationSeries {
        self.series
    }
}

impl Problem for BassProblem<'_> {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    fn fitness(&self, x: &[f64]) -> f64 {
        match x {
            [p, q, m] => residual_sum_of_squares(
                &[*p, *q, *m],
                self.series.offsets(),
                self.series.values(),
            ),
            _ => f64::NAN,
        }
    }
}
