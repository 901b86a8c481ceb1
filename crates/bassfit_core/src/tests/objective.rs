//! Tests for the Bass objective
//!
//! These tests verify that:
//! - No diffusion (p = q = 0) predicts no adoption
//! - The residual sum of squares is never negative
//! - Reordering the observations does not change the objective
//! - An exact synthetic series has zero residual at its parameters

use rand::{Rng, SeedableRng};

use crate::bass::{objective, predict, residual_sum_of_squares};
use crate::model::{BassParameters, ObservationSeries};
use crate::synthetic::exact_observations;

fn random_params(rng: &mut impl Rng) -> BassParameters {
    BassParameters::new(
        rng.random::<f64>(),
        rng.random::<f64>(),
        1.0 + rng.random::<f64>() * 99_999.0,
    )
}

fn sample_series() -> ObservationSeries {
    ObservationSeries::from_pairs([
        (1.0, 10.0),
        (2.0, 25.0),
        (3.0, 45.0),
        (4.0, 60.0),
        (5.0, 52.0),
        (6.0, 41.0),
        (7.0, 30.0),
    ])
    .unwrap()
}

#[test]
fn test_no_diffusion_predicts_zero() {
    for m in [1.0, 250.0, 100_000.0] {
        let params = BassParameters::new(0.0, 0.0, m);
        for x in 1..=48 {
            let pred = predict(&params, x as f64);
            // Only the 1e-10 stabilizer keeps this from being exactly zero
            assert!(pred.abs() <= m * 1e-8, "m={m}, x={x}, pred={pred}");
        }
    }
}

#[test]
fn test_objective_is_non_negative() {
    let series = sample_series();
    let mut rng = rand::rngs::SmallRng::seed_from_u64(17);

    for _ in 0..2000 {
        let params = random_params(&mut rng);
        let value = objective(&params, &series);
        assert!(value >= 0.0, "{params:?} gave {value}");
    }
}

#[test]
fn test_objective_is_order_invariant() {
    let forward = sample_series();
    let mut pairs: Vec<(f64, f64)> = forward.iter().collect();
    pairs.reverse();
    pairs.swap(1, 4);
    let shuffled = ObservationSeries::from_pairs(pairs).unwrap();

    let mut rng = rand::rngs::SmallRng::seed_from_u64(23);
    for _ in 0..200 {
        let params = random_params(&mut rng);
        let a = objective(&params, &forward);
        let b = objective(&params, &shuffled);
        let scale = a.abs().max(1.0);
        assert!((a - b).abs() <= scale * 1e-12, "{a} vs {b}");
    }
}

#[test]
fn test_exact_series_has_zero_residual() {
    let params = BassParameters::new(0.03, 0.38, 5000.0);
    let series = ObservationSeries::from_pairs(exact_observations(&params, 36)).unwrap();

    assert!(objective(&params, &series) <= 1e-8);

    // Any other point is strictly worse
    let nudged = BassParameters::new(0.031, 0.38, 5000.0);
    assert!(objective(&nudged, &series) > 1e-6);
}

#[test]
fn test_slice_form_matches_series_form() {
    let series = sample_series();
    let params = BassParameters::new(0.2, 0.4, 300.0);
    assert_eq!(
        residual_sum_of_squares(&params.to_vector(), series.offsets(), series.values()),
        objective(&params, &series)
    );
}
