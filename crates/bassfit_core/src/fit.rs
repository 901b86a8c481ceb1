//! Per-zone fitting
//!
//! Zones are fitted one after another. For each zone the driver keeps only
//! the positive-offset observations, skips the zone if none remain, and
//! otherwise runs the archipelago on a [`BassProblem`] bound to the zone's
//! series. The series is dropped as soon as the zone's result exists.

use serde::{Deserialize, Serialize};

use crate::bass::BassProblem;
use crate::data::{AdoptionDataset, ColumnNames};
use crate::error::{FitError, Result};
use crate::model::{BassParameters, FitResult, ObservationSeries, ResultSet, ZoneId};
use crate::optimization::{ArchipelagoConfig, evolve};

/// What to do when fitting a zone fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FailurePolicy {
    /// Stop the whole run on the first failing zone
    #[default]
    Abort,

    /// Record the failure and continue with the next zone
    SkipZone,
}

/// Everything needed to fit a dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub archipelago: ArchipelagoConfig,
    pub columns: ColumnNames,
    pub failure_policy: FailurePolicy,
}

/// Progress notifications emitted while a dataset is fitted
#[derive(Debug)]
pub enum FitEvent<'a> {
    /// A zone with usable observations is about to be fitted
    ZoneStarted {
        zone: &'a ZoneId,
        /// Position of the zone in the dataset (0-based)
        index: usize,
        total: usize,
        observations: usize,
    },

    /// A zone had no positive-offset observation
    ZoneSkipped { zone: &'a ZoneId },

    /// A zone was fitted
    ZoneFitted { result: &'a FitResult },

    /// A zone failed and the run continues
    ZoneFailed { zone: &'a ZoneId, error: &'a FitError },
}

/// Progress callback for dataset fitting
pub type ProgressCallback = Box<dyn Fn(&FitEvent<'_>) + Send + Sync>;

/// Fit a single zone's series
///
/// Blocks until every island has finished and returns the champion with the
/// lowest residual sum of squares (first island wins ties).
pub fn fit_zone(
    zone: &ZoneId,
    series: &ObservationSeries,
    config: &ArchipelagoConfig,
) -> Result<FitResult> {
    let problem = BassProblem::new(series);
    let outcome = evolve(&problem, config)?;

    let best = outcome.best().ok_or(FitError::NoFiniteChampion)?;
    let parameters = BassParameters::from_slice(&best.parameter_values).ok_or_else(|| {
        FitError::config(format!(
            "champion has {} values, expected 3",
            best.parameter_values.len()
        ))
    })?;

    Ok(FitResult {
        zone: zone.clone(),
        parameters,
        objective_value: best.objective_value,
        island: best.island,
        observations: series.len(),
        evaluations: outcome.total_evaluations(),
    })
}

/// Fit every zone of a dataset in order of first appearance
///
/// # Arguments
/// * `dataset` - Input rows grouped by zone
/// * `config` - Optimizer settings and failure policy
/// * `progress_callback` - Optional callback for progress updates
///
/// # Errors
/// Under [`FailurePolicy::Abort`] the first zone failure is returned as
/// `ZoneFailed` and no results are kept.
pub fn fit_dataset(
    dataset: &AdoptionDataset,
    config: &FitConfig,
    progress_callback: Option<ProgressCallback>,
) -> Result<ResultSet> {
    config.archipelago.validate()?;

    let notify = |event: FitEvent<'_>| {
        if let Some(ref callback) = progress_callback {
            callback(&event);
        }
    };

    let total = dataset.len();
    let mut results = ResultSet::new();

    for (index, records) in dataset.zones().iter().enumerate() {
        let zone = &records.zone;

        let Some(series) = records.observation_series() else {
            notify(FitEvent::ZoneSkipped { zone });
            results.record_skipped(zone.clone());
            continue;
        };

        notify(FitEvent::ZoneStarted {
            zone,
            index,
            total,
            observations: series.len(),
        });

        match fit_zone(zone, &series, &config.archipelago) {
            Ok(result) => {
                notify(FitEvent::ZoneFitted { result: &result });
                results.push(result);
            }
            Err(error) => match config.failure_policy {
                FailurePolicy::Abort => {
                    return Err(FitError::ZoneFailed {
                        zone: zone.clone(),
                        source: Box::new(error),
                    });
                }
                FailurePolicy::SkipZone => {
                    notify(FitEvent::ZoneFailed {
                        zone,
                        error: &error,
                    });
                    results.record_failure(zone.clone(), error.to_string());
                }
            },
        }
    }

    Ok(results)
}
