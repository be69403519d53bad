use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::FeatureError;

/// ordered feature names expected by a trained estimator. the estimator, not
/// the feature builder, owns this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema(Vec<String>);

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Result<FeatureSchema, FeatureError> {
        if names.is_empty() {
            return Err(FeatureError::EmptySchema);
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in names.iter() {
            if !seen.insert(name.as_str()) {
                return Err(FeatureError::DuplicateFeature(name.clone()));
            }
        }
        Ok(FeatureSchema(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = FeatureError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        FeatureSchema::new(value)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(value: FeatureSchema) -> Self {
        value.0
    }
}
