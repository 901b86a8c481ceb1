//! Scenario tests for the fitting library
//!
//! Tests are organized by topic:
//! - `objective` - Properties of the residual-sum-of-squares objective
//! - `recovery` - Fitting synthetic series back to their parameters
//! - `end_to_end` - CSV in, archipelago fit, CSV out

mod objective;
mod recovery;
