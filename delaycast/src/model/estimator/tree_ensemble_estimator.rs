use delaycast_core::model::feature::{CategoryEncoding, FeatureSchema, FeatureVector};
use serde::{Deserialize, Serialize};

use super::{DelayEstimator, EstimatorError, EstimatorType};

/// comparison used at a split node to send a sample to the left child.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// `x <= threshold` goes left
    LessOrEqual,
    /// `x < threshold` goes left
    LessThan,
}

impl SplitRule {
    pub fn goes_left(&self, x: f64, threshold: f64) -> bool {
        match self {
            SplitRule::LessOrEqual => x <= threshold,
            SplitRule::LessThan => x < threshold,
        }
    }
}

/// a node of a flattened regression tree. children are node indices and a
/// negative child marks a leaf.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TreeNode {
    #[serde(default)]
    pub feature: usize,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default = "leaf_child")]
    pub left: i64,
    #[serde(default = "leaf_child")]
    pub right: i64,
    #[serde(default)]
    pub value: f64,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.left < 0 || self.right < 0
    }
}

fn leaf_child() -> i64 {
    -1
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TreeModel {
    pub nodes: Vec<TreeNode>,
}

impl TreeModel {
    /// checks that the tree has a root, splits reference known features and
    /// every child comes after its parent, so that evaluation terminates.
    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err(String::from("tree has no nodes"));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                continue;
            }
            if node.feature >= n_features {
                return Err(format!(
                    "node {idx} splits on feature {} but there are {n_features} features",
                    node.feature
                ));
            }
            for child in [node.left, node.right] {
                let child = child as usize;
                if child <= idx || child >= self.nodes.len() {
                    return Err(format!("node {idx} has invalid child {child}"));
                }
            }
        }
        Ok(())
    }

    /// the leaf value reached by `values`. assumes a validated tree.
    fn evaluate(&self, values: &[f64], rule: SplitRule) -> f64 {
        let mut idx = 0;
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf() {
                return node.value;
            }
            let next = if rule.goes_left(values[node.feature], node.threshold) {
                node.left
            } else {
                node.right
            };
            idx = next as usize;
        }
    }
}

/// exported tree ensemble.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EnsembleModel {
    pub features: FeatureSchema,
    pub trees: Vec<TreeModel>,
    /// starting prediction of a boosted ensemble
    #[serde(default)]
    pub init: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// overrides the split comparison implied by the estimator type
    #[serde(default)]
    pub split_rule: Option<SplitRule>,
}

fn default_learning_rate() -> f64 {
    1.0
}

/// random forest, gradient boosting and xgboost estimators. a forest averages
/// its trees, boosted ensembles add the scaled sum of their trees to `init`.
#[derive(Debug, Clone)]
pub struct TreeEnsembleEstimator {
    estimator_type: EstimatorType,
    model: EnsembleModel,
    encoding: CategoryEncoding,
    split_rule: SplitRule,
}

impl TreeEnsembleEstimator {
    pub fn new(
        estimator_type: EstimatorType,
        model: EnsembleModel,
        encoding: CategoryEncoding,
    ) -> Result<TreeEnsembleEstimator, EstimatorError> {
        let invalid = |message: String| EstimatorError::InvalidModel {
            estimator: estimator_type.to_string(),
            message,
        };
        if estimator_type.is_linear() {
            return Err(invalid(format!("{estimator_type} is not a tree ensemble")));
        }
        if model.trees.is_empty() {
            return Err(invalid(String::from("ensemble has no trees")));
        }
        for (idx, tree) in model.trees.iter().enumerate() {
            tree.validate(model.features.len())
                .map_err(|e| invalid(format!("tree {idx}: {e}")))?;
        }
        let split_rule = match (model.split_rule, estimator_type) {
            (Some(rule), _) => rule,
            (None, EstimatorType::Xgboost) => SplitRule::LessThan,
            (None, _) => SplitRule::LessOrEqual,
        };
        Ok(TreeEnsembleEstimator {
            estimator_type,
            model,
            encoding,
            split_rule,
        })
    }
}

impl DelayEstimator for TreeEnsembleEstimator {
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
        if values.len() != self.model.features.len() {
            return Err(EstimatorError::Prediction {
                estimator: self.name().to_string(),
                message: format!(
                    "expected {} features, found {}",
                    self.model.features.len(),
                    values.len()
                ),
            });
        }
        let sum: f64 = self
            .model
            .trees
            .iter()
            .map(|t| t.evaluate(&values, self.split_rule))
            .sum();
        let prediction = match self.estimator_type {
            EstimatorType::RandomForest => sum / self.model.trees.len() as f64,
            _ => self.model.init + self.model.learning_rate * sum,
        };
        Ok(prediction)
    }
}
