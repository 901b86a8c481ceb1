//! Command-line front end for Bass diffusion fitting
//!
//! Reads a per-zone adoption table, fits every zone with
//! [`bassfit_core`], and writes `best_parameter_<label>.csv`.

pub mod config;
pub mod logging;
pub mod run;

pub use config::Args;
pub use logging::init_logging;
pub use run::run;
