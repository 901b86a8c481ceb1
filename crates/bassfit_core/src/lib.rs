//! Bass diffusion model fitting library
//!
//! This crate fits the three Bass parameters (innovation `p`, imitation `q`,
//! market size `m`) to per-zone adoption series. It provides:
//! - A pure, allocation-free residual-sum-of-squares objective
//! - A pluggable box-bounded optimizer interface with particle swarm and
//!   Nelder-Mead islands, run as a parallel archipelago
//! - CSV input grouping by zone and a single-write CSV result table
//!
//! # Example
//!
//! ```ignore
//! use bassfit_core::{data, fit, output};
//!
//! let dataset = data::read_dataset(Path::new("adoption.csv"), &ColumnNames::default())?;
//! let results = fit::fit_dataset(&dataset, &FitConfig::default(), None)?;
//! output::write_results(&output::output_path(Path::new("."), "run1")?, &results)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod bass;
pub mod data;
pub mod error;
pub mod fit;
pub mod optimization;
pub mod output;
pub mod synthetic;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use data::{AdoptionDataset, ColumnNames, ZoneRecords};
pub use error::{FitError, Result};
pub use fit::{FailurePolicy, FitConfig, FitEvent, ProgressCallback, fit_dataset, fit_zone};
pub use model::{BassParameters, FitResult, ObservationSeries, ResultSet, ZoneId};
pub use optimization::{ArchipelagoConfig, Bounds, Problem, evolve};
