use crate::model::ZoneId;

/// Errors raised while reading, fitting or writing adoption data
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("line {line}: invalid value '{value}' in column '{column}'")]
    InvalidRecord {
        line: u64,
        column: String,
        value: String,
    },

    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// Every island ended with a NaN objective
    #[error("no island produced a finite objective value")]
    NoFiniteChampion,

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error("fitting zone {zone} failed: {source}")]
    ZoneFailed {
        zone: ZoneId,
        #[source]
        source: Box<FitError>,
    },
}

impl FitError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        FitError::InvalidConfig(msg.into())
    }
}

#[cfg(feature = "parallel")]
impl From<rayon::ThreadPoolBuildError> for FitError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        FitError::WorkerPool(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FitError>;
