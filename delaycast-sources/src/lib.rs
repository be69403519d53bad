pub mod cache;
pub mod file;
pub mod http;
mod sources_config;

pub use sources_config::{DataSources, SourcesConfig};
