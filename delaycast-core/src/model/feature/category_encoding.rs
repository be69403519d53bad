use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::FeatureValue;

/// code assigned to a category that was never seen when the table was built.
pub const UNSEEN_CATEGORY: i64 = -1;

/// one feature's category table as it may appear on disk: either the ordered
/// class list of a label encoder (code = position) or an explicit mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodingTable {
    Classes(Vec<String>),
    Codes(HashMap<String, i64>),
}

impl From<EncodingTable> for HashMap<String, i64> {
    fn from(value: EncodingTable) -> Self {
        match value {
            EncodingTable::Classes(classes) => classes
                .into_iter()
                .enumerate()
                .map(|(code, class)| (class, code as i64))
                .collect(),
            EncodingTable::Codes(codes) => codes,
        }
    }
}

/// categorical encoding tables keyed by feature name, built at training time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, EncodingTable>", into = "HashMap<String, HashMap<String, i64>>")]
pub struct CategoryEncoding {
    tables: HashMap<String, HashMap<String, i64>>,
}

impl CategoryEncoding {
    pub fn new(tables: HashMap<String, HashMap<String, i64>>) -> CategoryEncoding {
        CategoryEncoding { tables }
    }

    /// builds tables from ordered class lists, assigning each class its position.
    pub fn from_classes(classes: HashMap<String, Vec<String>>) -> CategoryEncoding {
        let tables = classes
            .into_iter()
            .map(|(feature, cls)| (feature, EncodingTable::Classes(cls).into()))
            .collect();
        CategoryEncoding { tables }
    }

    /// true if this feature is categorical.
    pub fn is_categorical(&self, feature: &str) -> bool {
        self.tables.contains_key(feature)
    }

    pub fn features(&self) -> impl Iterator<Item = &String> {
        self.tables.keys()
    }

    /// encodes a raw value for a feature. returns `None` when the feature has
    /// no table. a value missing from the table encodes as [`UNSEEN_CATEGORY`].
    pub fn encode(&self, feature: &str, value: &FeatureValue) -> Option<i64> {
        let table = self.tables.get(feature)?;
        let label = value.category_label();
        Some(table.get(&label).copied().unwrap_or(UNSEEN_CATEGORY))
    }
}

impl From<HashMap<String, EncodingTable>> for CategoryEncoding {
    fn from(value: HashMap<String, EncodingTable>) -> Self {
        let tables = value.into_iter().map(|(k, v)| (k, v.into())).collect();
        CategoryEncoding { tables }
    }
}

impl From<CategoryEncoding> for HashMap<String, HashMap<String, i64>> {
    fn from(value: CategoryEncoding) -> Self {
        value.tables
    }
}
