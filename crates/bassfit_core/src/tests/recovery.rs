//! Tests for recovering known parameters from synthetic series

use crate::bass::objective;
use crate::fit::fit_zone;
use crate::model::{BassParameters, ObservationSeries, ZoneId};
use crate::optimization::{AlgorithmKind, ArchipelagoConfig};
use crate::synthetic::{exact_observations, noisy_observations};

fn recovery_config() -> ArchipelagoConfig {
    ArchipelagoConfig {
        islands: 4,
        population_size: 50,
        generations: 2000,
        max_workers: 4,
        seed: Some(2024),
        ..Default::default()
    }
}

fn assert_recovered(found: &BassParameters, truth: &BassParameters) {
    assert!((found.p - truth.p).abs() <= 0.01, "p: {found:?} vs {truth:?}");
    assert!((found.q - truth.q).abs() <= 0.01, "q: {found:?} vs {truth:?}");
    assert!(
        (found.m - truth.m).abs() <= 0.01 * truth.m,
        "m: {found:?} vs {truth:?}"
    );
}

#[test]
fn test_swarm_recovers_exact_series() {
    let truth = BassParameters::new(0.03, 0.38, 5000.0);
    let series = ObservationSeries::from_pairs(exact_observations(&truth, 36)).unwrap();

    let result = fit_zone(&ZoneId::from("synthetic"), &series, &recovery_config()).unwrap();

    assert_recovered(&result.parameters, &truth);
    assert!(result.parameters.within_search_space());
}

#[test]
fn test_fit_is_at_least_as_good_as_truth_on_noisy_series() {
    let truth = BassParameters::new(0.05, 0.25, 800.0);
    let series =
        ObservationSeries::from_pairs(noisy_observations(&truth, 24, 1.5, 77).unwrap()).unwrap();

    let result = fit_zone(&ZoneId::from("noisy"), &series, &recovery_config()).unwrap();

    let truth_rss = objective(&truth, &series);
    assert!(
        result.objective_value <= truth_rss * (1.0 + 1e-6),
        "fit {} vs truth {}",
        result.objective_value,
        truth_rss
    );
    assert!((objective(&result.parameters, &series) - result.objective_value).abs() < 1e-9);
}

#[test]
fn test_same_seed_gives_same_fit() {
    let truth = BassParameters::new(0.02, 0.5, 1200.0);
    let series = ObservationSeries::from_pairs(exact_observations(&truth, 12)).unwrap();
    let config = ArchipelagoConfig {
        generations: 100,
        ..recovery_config()
    };

    let a = fit_zone(&ZoneId::from("z"), &series, &config).unwrap();
    let b = fit_zone(&ZoneId::from("z"), &series, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_nelder_mead_islands_fit_exact_series() {
    let truth = BassParameters::new(0.03, 0.38, 5000.0);
    let series = ObservationSeries::from_pairs(exact_observations(&truth, 36)).unwrap();
    let config = ArchipelagoConfig {
        algorithm: AlgorithmKind::NelderMead,
        islands: 32,
        generations: 5000,
        ..recovery_config()
    };

    let result = fit_zone(&ZoneId::from("simplex"), &series, &config).unwrap();

    let truth_rss = objective(&truth, &series);
    let start_rss = objective(&BassParameters::new(0.5, 0.5, 50_000.0), &series);
    assert!(truth_rss <= 1e-8);
    assert!(result.objective_value < start_rss);
    assert!(result.parameters.within_search_space());
}
