use super::SourceError;

/// reasons why conditions at a stop could not be resolved. these are
/// data-unavailable conditions: the stop is skipped, the simulation goes on.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConditionsError {
    #[error("weather forecast at ({latitude}, {longitude}) unavailable: {source}")]
    WeatherFetch {
        latitude: f64,
        longitude: f64,
        source: SourceError,
    },
    #[error("weather forecast at ({latitude}, {longitude}) has no entries")]
    EmptyWeatherSeries { latitude: f64, longitude: f64 },
    #[error("context for station '{station_code}' unavailable: {source}")]
    StationFetch {
        station_code: String,
        source: SourceError,
    },
}
