use indexmap::IndexMap;
use serde::Serialize;

use super::{FeatureSchema, FeatureValue};

/// named feature values in build order, before encoding.
pub type RawFeatures = IndexMap<String, FeatureValue>;

/// numeric, encoded features aligned to an estimator's [`FeatureSchema`]:
/// exactly the schema's names, in the schema's order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(IndexMap<String, f64>);

impl FeatureVector {
    /// reindexes encoded features onto the schema. schema fields missing from
    /// `encoded` are zero-filled and fields outside of the schema are dropped.
    pub fn aligned(encoded: &IndexMap<String, f64>, schema: &FeatureSchema) -> FeatureVector {
        let values = schema
            .names()
            .iter()
            .map(|name| (name.clone(), encoded.get(name).copied().unwrap_or(0.0)))
            .collect();
        FeatureVector(values)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// values in schema order.
    pub fn values(&self) -> Vec<f64> {
        self.0.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, f64> {
        self.0.iter()
    }
}
