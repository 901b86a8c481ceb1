//! Per-zone observation series
//!
//! Offsets and values are stored as two parallel arrays so the objective
//! can walk them as plain slices. A series is never empty and only holds
//! strictly positive offsets.

/// Adoption observations of one zone, ready for fitting
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    offsets: Vec<f64>,
    values: Vec<f64>,
}

impl ObservationSeries {
    /// Build a series from `(offset, value)` pairs, keeping input order.
    ///
    /// Pairs with a zero, negative or NaN offset are dropped. Returns `None` when
    /// nothing remains.
    pub fn from_pairs<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (offsets, values): (Vec<f64>, Vec<f64>) =
            pairs.into_iter().filter(|(offset, _)| *offset > 0.0).unzip();

        if offsets.is_empty() {
            None
        } else {
            Some(Self { offsets, values })
        }
    }

    /// Elapsed periods of each observation
    #[must_use]
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Observed adoption of each observation
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.offsets.iter().copied().zip(self.values.iter().copied())
    }
}
