//! the trained delay estimator consumed by the propagation. estimators are
//! exported from training as JSON and loaded by [`EstimatorConfig::build`].
mod delay_estimator;
mod estimator_config;
mod estimator_error;
mod estimator_type;
mod linear_estimator;
mod tree_ensemble_estimator;

pub use delay_estimator::DelayEstimator;
pub use estimator_config::EstimatorConfig;
pub use estimator_error::EstimatorError;
pub use estimator_type::EstimatorType;
pub use linear_estimator::{LinearEstimator, LinearModel, StandardScaler};
pub use tree_ensemble_estimator::{
    EnsembleModel, SplitRule, TreeEnsembleEstimator, TreeModel, TreeNode,
};
