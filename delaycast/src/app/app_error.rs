use std::path::PathBuf;

use delaycast_core::source::SourceError;

use crate::model::{estimator::EstimatorError, SimulationError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("failure building data sources: {0}")]
    Source(#[from] SourceError),
    #[error("failure loading estimator: {0}")]
    Estimator(#[from] EstimatorError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
