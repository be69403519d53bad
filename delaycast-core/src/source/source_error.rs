use std::path::PathBuf;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("request to '{url}' failed: {message}")]
    Request { url: String, message: String },
    #[error("request to '{url}' returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },
    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },
    #[error("Error reading from '{path}': {message}")]
    Read { path: PathBuf, message: String },
    #[error("{0}")]
    Internal(String),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}
