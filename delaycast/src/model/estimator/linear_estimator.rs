use delaycast_core::model::feature::{CategoryEncoding, FeatureSchema, FeatureVector};
use serde::{Deserialize, Serialize};

use super::{DelayEstimator, EstimatorError, EstimatorType};

/// per-feature standardization applied before the linear model, as fitted
/// by a standard scaler.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// exported linear model: one coefficient per feature plus an intercept.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LinearModel {
    pub features: FeatureSchema,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

/// linear regression, ridge and lasso estimators.
#[derive(Debug, Clone)]
pub struct LinearEstimator {
    estimator_type: EstimatorType,
    model: LinearModel,
    encoding: CategoryEncoding,
}

impl LinearEstimator {
    pub fn new(
        estimator_type: EstimatorType,
        model: LinearModel,
        encoding: CategoryEncoding,
    ) -> Result<LinearEstimator, EstimatorError> {
        let invalid = |message: String| EstimatorError::InvalidModel {
            estimator: estimator_type.to_string(),
            message,
        };
        if !estimator_type.is_linear() {
            return Err(invalid(format!(
                "{estimator_type} is not a linear model family"
            )));
        }
        let n = model.features.len();
        if model.coefficients.len() != n {
            return Err(invalid(format!(
                "expected {n} coefficients, found {}",
                model.coefficients.len()
            )));
        }
        if let Some(scaler) = &model.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(invalid(format!(
                    "scaler must have {n} means and scales, found {} and {}",
                    scaler.mean.len(),
                    scaler.scale.len()
                )));
            }
        }
        Ok(LinearEstimator {
            estimator_type,
            model,
            encoding,
        })
    }

    fn standardize(&self, idx: usize, x: f64) -> f64 {
        match &self.model.scaler {
            None => x,
            Some(scaler) => {
                // zero variance features are left unscaled
                let scale = match scaler.scale[idx] {
                    s if s == 0.0 => 1.0,
                    s => s,
                };
                (x - scaler.mean[idx]) / scale
            }
        }
    }
}

impl DelayEstimator for LinearEstimator {
    fn name(&self) -> &str {
        self.estimator_type.as_str()
    }

    fn schema(&self) -> &FeatureSchema {
        &self.model.features
    }

    fn encoding(&self) -> &CategoryEncoding {
        &self.encoding
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, EstimatorError> {
        let values = features.values();
        if values.len() != self.model.coefficients.len() {
            return Err(EstimatorError::Prediction {
                estimator: self.name().to_string(),
                message: format!(
                    "expected {} features, found {}",
                    self.model.coefficients.len(),
                    values.len()
                ),
            });
        }
        let prediction = values
            .iter()
            .enumerate()
            .map(|(idx, x)| self.model.coefficients[idx] * self.standardize(idx, *x))
            .sum::<f64>()
            + self.model.intercept;
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![String::from("temp"), String::from("trains_nearby")]).unwrap()
    }

    fn features(temp: f64, trains: f64) -> FeatureVector {
        let encoded = IndexMap::from([
            (String::from("temp"), temp),
            (String::from("trains_nearby"), trains),
        ]);
        FeatureVector::aligned(&encoded, &schema())
    }

    #[test]
    fn test_unscaled_prediction() {
        let model = LinearModel {
            features: schema(),
            coefficients: vec![0.1, 2.0],
            intercept: -25.0,
            scaler: None,
        };
        let estimator =
            LinearEstimator::new(EstimatorType::LinearRegression, model, CategoryEncoding::default())
                .unwrap();
        let delay = estimator.predict(&features(300.0, 3.0)).unwrap();
        assert!((delay - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaled_prediction() {
        let model = LinearModel {
            features: schema(),
            coefficients: vec![1.0, 1.0],
            intercept: 4.0,
            scaler: Some(StandardScaler {
                mean: vec![290.0, 2.0],
                scale: vec![5.0, 0.0],
            }),
        };
        let estimator =
            LinearEstimator::new(EstimatorType::Ridge, model, CategoryEncoding::default()).unwrap();
        // (300 - 290) / 5 + (3 - 2) / 1 + 4
        let delay = estimator.predict(&features(300.0, 3.0)).unwrap();
        assert!((delay - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_coefficient_count_validated() {
        let model = LinearModel {
            features: schema(),
            coefficients: vec![1.0],
            intercept: 0.0,
            scaler: None,
        };
        let result = LinearEstimator::new(EstimatorType::Lasso, model, CategoryEncoding::default());
        assert!(matches!(result, Err(EstimatorError::InvalidModel { .. })));
    }

    #[test]
    fn test_deserialize_model() {
        let json = r#"{
            "features": ["temp", "trains_nearby"],
            "coefficients": [0.5, 1.5],
            "intercept": 2.0,
            "scaler": {"mean": [0.0, 0.0], "scale": [1.0, 1.0]}
        }"#;
        let model: LinearModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.features.len(), 2);
        assert_eq!(model.intercept, 2.0);
    }
}
