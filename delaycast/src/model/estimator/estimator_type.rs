use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use super::EstimatorError;

/// the regression families a trained estimator may come from.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorType {
    LinearRegression,
    Ridge,
    Lasso,
    RandomForest,
    GradientBoosting,
    Xgboost,
}

impl EstimatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimatorType::LinearRegression => "linear_regression",
            EstimatorType::Ridge => "ridge",
            EstimatorType::Lasso => "lasso",
            EstimatorType::RandomForest => "random_forest",
            EstimatorType::GradientBoosting => "gradient_boosting",
            EstimatorType::Xgboost => "xgboost",
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(
            self,
            EstimatorType::LinearRegression | EstimatorType::Ridge | EstimatorType::Lasso
        )
    }
}

impl Display for EstimatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EstimatorType {
    type Err = EstimatorError;

    /// accepts names in any case with spaces, hyphens or underscores between
    /// words, so "Random Forest" and "random-forest" are both random forests.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "linear_regression" => Ok(EstimatorType::LinearRegression),
            "ridge" => Ok(EstimatorType::Ridge),
            "lasso" => Ok(EstimatorType::Lasso),
            "random_forest" => Ok(EstimatorType::RandomForest),
            "gradient_boosting" => Ok(EstimatorType::GradientBoosting),
            "xgboost" => Ok(EstimatorType::Xgboost),
            _ => Err(EstimatorError::UnknownModel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_names() {
        assert_eq!(
            "Linear Regression".parse::<EstimatorType>().unwrap(),
            EstimatorType::LinearRegression
        );
        assert_eq!(
            "Random Forest".parse::<EstimatorType>().unwrap(),
            EstimatorType::RandomForest
        );
        assert_eq!(
            "gradient-boosting".parse::<EstimatorType>().unwrap(),
            EstimatorType::GradientBoosting
        );
        assert_eq!("XGBoost".parse::<EstimatorType>().unwrap(), EstimatorType::Xgboost);
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let result = "Neural Network".parse::<EstimatorType>();
        match result {
            Err(EstimatorError::UnknownModel(name)) => assert_eq!(name, "Neural Network"),
            other => panic!("expected unknown model error, found {other:?}"),
        }
    }

    #[test]
    fn test_linear_families() {
        assert!(EstimatorType::Ridge.is_linear());
        assert!(!EstimatorType::Xgboost.is_linear());
    }
}
