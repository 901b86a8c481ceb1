mod ids;
mod params;
mod results;
mod series;

pub use ids::ZoneId;
pub use params::{BassParameters, MARKET_SIZE_BOUNDS, PROBABILITY_BOUNDS, bass_bounds};
pub use results::{FitResult, ResultSet, ZoneFailure};
pub use series::ObservationSeries;
