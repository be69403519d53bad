use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum EstimatorError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),
    #[error("Error reading from '{path}': {message}")]
    Read { path: PathBuf, message: String },
    #[error("Error decoding '{path}': {message}")]
    Decode { path: PathBuf, message: String },
    #[error("invalid {estimator} model: {message}")]
    InvalidModel { estimator: String, message: String },
    #[error("{estimator} prediction failed: {message}")]
    Prediction { estimator: String, message: String },
}
