use std::path::Path;

use chrono_tz::Tz;
use config::{Config, File};
use delaycast_core::util::time_ops::DEFAULT_TIMEZONE;
use delaycast_sources::SourcesConfig;
use serde::{Deserialize, Serialize};

use super::AppError;
use crate::model::{estimator::EstimatorConfig, search::SearchConfig};

/// contents of a delaycast TOML configuration file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// zone all schedule and forecast times are normalized into
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default)]
    pub search: SearchConfig,
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

impl AppConfig {
    /// reads a configuration file. relative paths inside of it are resolved
    /// against the directory of the file.
    pub fn from_file(configuration_file: &str) -> Result<AppConfig, AppError> {
        let filepath = Path::new(configuration_file);
        let config = Config::builder()
            .add_source(File::from(filepath))
            .build()
            .map_err(|e| {
                let msg = format!("file '{configuration_file}' produced error: {e}");
                AppError::InvalidUserInput(msg)
            })?;
        let app_config = config.try_deserialize::<AppConfig>().map_err(|e| {
            let msg = format!("error reading configuration in '{configuration_file}': {e}");
            AppError::InvalidUserInput(msg)
        })?;
        let directory = filepath.parent().unwrap_or_else(|| Path::new(""));
        Ok(app_config.relative_to(directory))
    }

    pub fn relative_to(&self, directory: &Path) -> AppConfig {
        let sources = match &self.sources {
            SourcesConfig::File { directory: d } if d.is_relative() => SourcesConfig::File {
                directory: directory.join(d),
            },
            other => other.clone(),
        };
        AppConfig {
            timezone: self.timezone,
            search: self.search.clone(),
            estimator: self.estimator.relative_to(directory),
            sources,
        }
    }
}

fn default_timezone() -> Tz {
    DEFAULT_TIMEZONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test")
    }

    #[test]
    fn test_read_configuration_file() {
        let path = test_dir().join("delaycast.toml");
        let config = AppConfig::from_file(&path.to_string_lossy()).unwrap();
        assert_eq!(config.timezone, chrono_tz::Asia::Kolkata);
        assert_eq!(config.search.shift_interval, "30m");
        assert_eq!(config.search.shift_window, "1h");
        assert_eq!(config.search.parallelism, 2);
        assert_eq!(config.estimator.model_file, test_dir().join("random_forest.json"));
        assert_eq!(
            config.sources,
            SourcesConfig::File {
                directory: test_dir().join("data")
            }
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let toml = r#"
            [estimator]
            type = "ridge"
            model_file = "ridge.json"
        "#;
        let config = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap();
        assert_eq!(config.timezone, DEFAULT_TIMEZONE);
        assert_eq!(config.search, SearchConfig::default());
        assert_eq!(config.sources, SourcesConfig::default());
        assert_eq!(config.estimator.encoding_file, None);
    }

    #[test]
    fn test_missing_file_is_invalid_input() {
        let result = AppConfig::from_file("/does/not/exist.toml");
        assert!(matches!(result, Err(AppError::InvalidUserInput(_))));
    }
}
