//! Synthetic adoption series generated from known parameters

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::bass::predict;
use crate::error::{FitError, Result};
use crate::model::BassParameters;

/// Model output for offsets `1..=periods`, without noise
#[must_use]
pub fn exact_observations(params: &BassParameters, periods: usize) -> Vec<(f64, f64)> {
    (1..=periods)
        .map(|x| {
            let x = x as f64;
            (x, predict(params, x))
        })
        .collect()
}

/// Model output for offsets `1..=periods` plus Gaussian noise
///
/// # Errors
/// Returns `InvalidConfig` when `sigma` is negative or not finite.
pub fn noisy_observations(
    params: &BassParameters,
    periods: usize,
    sigma: f64,
    seed: u64,
) -> Result<Vec<(f64, f64)>> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(FitError::config(format!(
            "noise level must be finite and non-negative, got {sigma}"
        )));
    }
    let noise = Normal::new(0.0, sigma)
        .map_err(|e| FitError::config(format!("invalid noise level {sigma}: {e}")))?;
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);

    Ok(exact_observations(params, periods)
        .into_iter()
        .map(|(x, y)| (x, y + noise.sample(&mut rng)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_observations_offsets() {
        let params = BassParameters::new(0.03, 0.38, 1000.0);
        let obs = exact_observations(&params, 5);
        let offsets: Vec<f64> = obs.iter().map(|(x, _)| *x).collect();
        assert_eq!(offsets, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(obs.iter().all(|(_, y)| y.is_finite()));
    }

    #[test]
    fn test_noise_is_seeded() {
        let params = BassParameters::new(0.03, 0.38, 1000.0);
        let a = noisy_observations(&params, 10, 2.0, 1).unwrap();
        let b = noisy_observations(&params, 10, 2.0, 1).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, exact_observations(&params, 10));
    }

    #[test]
    fn test_zero_sigma_is_exact() {
        let params = BassParameters::new(0.03, 0.38, 1000.0);
        let noisy = noisy_observations(&params, 6, 0.0, 4).unwrap();
        assert_eq!(noisy, exact_observations(&params, 6));
    }

    #[test]
    fn test_negative_sigma_is_rejected() {
        let params = BassParameters::new(0.03, 0.38, 1000.0);
        assert!(matches!(
            noisy_observations(&params, 6, -1.0, 4),
            Err(FitError::InvalidConfig(_))
        ));
        assert!(noisy_observations(&params, 6, f64::NAN, 4).is_err());
        assert!(noisy_observations(&params, 6, f64::INFINITY, 4).is_err());
    }
}
