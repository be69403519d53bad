use delaycast_core::model::feature::{CategoryEncoding, FeatureSchema, FeatureVector};

use super::EstimatorError;

/// predicts the delay in minutes a train picks up at a single stop.
///
/// estimators are shared read-only across concurrently simulated variants.
pub trait DelayEstimator: Send + Sync {
    fn name(&self) -> &str;

    /// feature names and order this estimator was trained on.
    fn schema(&self) -> &FeatureSchema;

    /// categorical tables used to encode features for this estimator.
    fn encoding(&self) -> &CategoryEncoding;

    /// predicted delay in minutes for one stop. `features` is expected to be
    /// aligned to [`DelayEstimator::schema`].
    fn predict(&self, features: &FeatureVector) -> Result<f64, EstimatorError>;
}
