use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use delaycast_core::model::feature::CategoryEncoding;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{
    DelayEstimator, EnsembleModel, EstimatorError, EstimatorType, LinearEstimator, LinearModel,
    TreeEnsembleEstimator,
};

/// configures the trained estimator to load.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EstimatorConfig {
    /// estimator family name, such as "random_forest" or "Random Forest"
    #[serde(rename = "type")]
    pub estimator_type: String,
    /// JSON export of the trained model
    pub model_file: PathBuf,
    /// JSON category tables. without one, no feature is treated as categorical.
    #[serde(default)]
    pub encoding_file: Option<PathBuf>,
}

impl EstimatorConfig {
    /// resolves relative file paths against `directory`.
    pub fn relative_to(&self, directory: &Path) -> EstimatorConfig {
        let resolve = |p: &PathBuf| {
            if p.is_relative() {
                directory.join(p)
            } else {
                p.clone()
            }
        };
        EstimatorConfig {
            estimator_type: self.estimator_type.clone(),
            model_file: resolve(&self.model_file),
            encoding_file: self.encoding_file.as_ref().map(resolve),
        }
    }

    /// loads the estimator. the estimator type is checked before any file is
    /// read, so an unknown type fails fast.
    pub fn build(&self) -> Result<Arc<dyn DelayEstimator>, EstimatorError> {
        let estimator_type: EstimatorType = self.estimator_type.parse()?;
        let encoding = match &self.encoding_file {
            Some(path) => read_json::<CategoryEncoding>(path)?,
            None => CategoryEncoding::default(),
        };
        let estimator: Arc<dyn DelayEstimator> = if estimator_type.is_linear() {
            let model: LinearModel = read_json(&self.model_file)?;
            Arc::new(LinearEstimator::new(estimator_type, model, encoding)?)
        } else {
            let model: EnsembleModel = read_json(&self.model_file)?;
            Arc::new(TreeEnsembleEstimator::new(estimator_type, model, encoding)?)
        };
        log::info!(
            "loaded {} estimator with {} features from {}",
            estimator.name(),
            estimator.schema().len(),
            self.model_file.display()
        );
        Ok(estimator)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, EstimatorError> {
    let contents = std::fs::read_to_string(path).map_err(|e| EstimatorError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| EstimatorError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
