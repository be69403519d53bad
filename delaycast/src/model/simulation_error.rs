use delaycast_core::source::SourceError;

use super::estimator::EstimatorError;

#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    #[error("failed to fetch schedule of train '{train_id}': {source}")]
    ScheduleFetch {
        train_id: String,
        source: SourceError,
    },
    #[error("schedule of train '{0}' has no stop with a scheduled arrival")]
    EmptySchedule(String),
    #[error("baseline schedule does not match the simulated schedule: {0}")]
    MisalignedBaseline(String),
    #[error("time at stop {station_index} ('{station_code}') is out of range")]
    TimeOutOfRange {
        station_index: usize,
        station_code: String,
    },
    #[error("invalid search parameters: {0}")]
    InvalidSearch(String),
    #[error(transparent)]
    Estimator(#[from] EstimatorError),
    #[error("failure running variant simulations: {0}")]
    Worker(String),
}
