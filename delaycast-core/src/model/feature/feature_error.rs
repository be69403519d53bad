#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("feature schema must name at least one feature")]
    EmptySchema,
    #[error("feature schema lists '{0}' more than once")]
    DuplicateFeature(String),
}
