//! Adoption input table
//!
//! Reads a CSV file with a header row and groups its rows by zone. Only
//! three columns matter (zone, elapsed periods, adoption value); any other
//! column is ignored. Zones keep the order in which they first appear and
//! rows keep file order within a zone.

use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};
use crate::model::{ObservationSeries, ZoneId};

/// Header names of the columns the fit reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Zone identifier column
    pub zone: String,

    /// Elapsed periods since the reference date
    pub offset: String,

    /// Observed adoption
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            zone: "ZoneID".to_string(),
            offset: "months_passed_01_2021".to_string(),
            value: "2021-2024".to_string(),
        }
    }
}

/// All raw rows of one zone, including non-positive offsets
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRecords {
    pub zone: ZoneId,

    /// `(offset, value)` in file order
    pub rows: Vec<(f64, f64)>,
}

impl ZoneRecords {
    /// Rows usable for fitting, or `None` when the zone has no positive
    /// offset
    #[must_use]
    pub fn observation_series(&self) -> Option<ObservationSeries> {
        ObservationSeries::from_pairs(self.rows.iter().copied())
    }
}

/// Input rows grouped by zone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdoptionDataset {
    zones: Vec<ZoneRecords>,
}

struct ColumnIndices {
    zone: usize,
    offset: usize,
    value: usize,
}

impl ColumnIndices {
    fn locate(headers: &csv::StringRecord, names: &ColumnNames) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| FitError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            zone: find(&names.zone)?,
            offset: find(&names.offset)?,
            value: find(&names.value)?,
        })
    }
}

fn parse_cell(cell: &str, line: u64, column: &str) -> Result<f64> {
    cell.parse::<f64>().map_err(|_| FitError::InvalidRecord {
        line,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

impl AdoptionDataset {
    /// Parse a CSV table from any reader
    ///
    /// An empty offset cell reads as NaN, so the row is kept but never
    /// fitted. An empty adoption cell is accepted on rows whose offset is
    /// not positive, since those rows never reach the fit either.
    pub fn from_reader<R: io::Read>(reader: R, columns: &ColumnNames) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let indices = ColumnIndices::locate(csv_reader.headers()?, columns)?;

        let mut zones: Vec<ZoneRecords> = Vec::new();
        let mut zone_index: FxHashMap<String, usize> = FxHashMap::default();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let cell = |idx: usize| record.get(idx).unwrap_or("");

            let offset_cell = cell(indices.offset);
            let offset = if offset_cell.is_empty() {
                f64::NAN
            } else {
                parse_cell(offset_cell, line, &columns.offset)?
            };
            let value_cell = cell(indices.value);
            let used_for_fit = offset > 0.0;
            let value = if value_cell.is_empty() && !used_for_fit {
                f64::NAN
            } else {
                parse_cell(value_cell, line, &columns.value)?
            };

            let zone = cell(indices.zone);
            let slot = match zone_index.get(zone) {
                Some(&slot) => slot,
                None => {
                    zone_index.insert(zone.to_string(), zones.len());
                    zones.push(ZoneRecords {
                        zone: ZoneId::from(zone),
                        rows: Vec::new(),
                    });
                    zones.len() - 1
                }
            };
            zones[slot].rows.push((offset, value));
        }

        Ok(Self { zones })
    }

    /// Read a CSV file from disk
    pub fn read(path: &Path, columns: &ColumnNames) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(io::BufReader::new(file), columns)
    }

    #[must_use]
    pub fn zones(&self) -> &[ZoneRecords] {
        &self.zones
    }

    /// Number of distinct zones
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Number of data rows across all zones
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.zones.iter().map(|z| z.rows.len()).sum()
    }
}

impl FromIterator<ZoneRecords> for AdoptionDataset {
    fn from_iter<I: IntoIterator<Item = ZoneRecords>>(iter: I) -> Self {
        Self {
            zones: iter.into_iter().collect(),
        }
    }
}

/// Read a CSV file from disk
pub fn read_dataset(path: &Path, columns: &ColumnNames) -> Result<AdoptionDataset> {
    AdoptionDataset::read(path, columns)
}
