//! conversion of a stop and the conditions sampled for it into the flat,
//! schema-aligned numeric input consumed by a delay estimator.
mod category_encoding;
mod feature_builder;
mod feature_error;
mod feature_schema;
mod feature_value;
mod feature_vector;

pub mod fieldname;

pub use category_encoding::{CategoryEncoding, UNSEEN_CATEGORY};
pub use feature_builder::{
    align, build_feature_vector, build_raw_features, encode_features, CELSIUS_TO_KELVIN,
};
pub use feature_error::FeatureError;
pub use feature_schema::FeatureSchema;
pub use feature_value::FeatureValue;
pub use feature_vector::{FeatureVector, RawFeatures};
