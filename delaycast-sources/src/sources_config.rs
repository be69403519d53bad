use std::{path::PathBuf, sync::Arc, time::Duration};

use delaycast_core::source::{ScheduleSource, SourceError, StationSource, WeatherSource};
use serde::{Deserialize, Serialize};

use crate::{
    cache::{CachedStationSource, CachedWeatherSource, DEFAULT_CACHE_EXPIRY_SECS},
    file::FileSource,
    http::{
        HttpClient, OpenMeteoSource, RailwayApiSource, RetryPolicy, DEFAULT_API_BASE_URL,
        DEFAULT_BACKOFF_FACTOR, DEFAULT_RETRIES, DEFAULT_TIMEOUT_SECS, DEFAULT_WEATHER_URL,
    },
};

/// configures where schedules, station forecasts and weather come from.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SourcesConfig {
    Http {
        #[serde(default = "default_api_base_url")]
        api_base_url: String,
        #[serde(default = "default_weather_url")]
        weather_url: String,
        /// per-request timeout in seconds
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        #[serde(default = "default_retries")]
        retries: u32,
        #[serde(default = "default_backoff_factor")]
        backoff_factor: f64,
        /// lifetime of cached weather and station responses in seconds
        #[serde(default = "default_cache_expiry_secs")]
        cache_expiry_secs: u64,
    },
    File {
        directory: PathBuf,
    },
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig::Http {
            api_base_url: default_api_base_url(),
            weather_url: default_weather_url(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            backoff_factor: default_backoff_factor(),
            cache_expiry_secs: default_cache_expiry_secs(),
        }
    }
}

/// data source handles shared by every simulation run.
#[derive(Clone)]
pub struct DataSources {
    pub schedules: Arc<dyn ScheduleSource>,
    pub stations: Arc<dyn StationSource>,
    pub weather: Arc<dyn WeatherSource>,
}

impl SourcesConfig {
    pub fn build(&self) -> Result<DataSources, SourceError> {
        match self {
            SourcesConfig::Http {
                api_base_url,
                weather_url,
                timeout_secs,
                retries,
                backoff_factor,
                cache_expiry_secs,
            } => {
                if !backoff_factor.is_finite() || *backoff_factor < 0.0 {
                    return Err(SourceError::Internal(format!(
                        "backoff_factor must be a non-negative number, found {backoff_factor}"
                    )));
                }
                let client = HttpClient::new(
                    Duration::from_secs(*timeout_secs),
                    RetryPolicy::new(*retries, *backoff_factor),
                )?;
                let expiry = Duration::from_secs(*cache_expiry_secs);
                let railway = Arc::new(RailwayApiSource::new(api_base_url, client.clone()));
                let weather = OpenMeteoSource::new(weather_url, client);
                log::info!(
                    "using railway API at {api_base_url} and weather API at {weather_url}, caching responses for {}",
                    humantime::format_duration(expiry)
                );
                Ok(DataSources {
                    schedules: railway.clone(),
                    stations: Arc::new(CachedStationSource::new(railway, expiry)),
                    weather: Arc::new(CachedWeatherSource::new(Arc::new(weather), expiry)),
                })
            }
            SourcesConfig::File { directory } => {
                if !directory.is_dir() {
                    return Err(SourceError::Read {
                        path: directory.clone(),
                        message: String::from("not a directory"),
                    });
                }
                log::info!("reading source data from {}", directory.display());
                let source = Arc::new(FileSource::new(directory));
                Ok(DataSources {
                    schedules: source.clone(),
                    stations: source.clone(),
                    weather: source,
                })
            }
        }
    }
}

fn default_api_base_url() -> String {
    String::from(DEFAULT_API_BASE_URL)
}

fn default_weather_url() -> String {
    String::from(DEFAULT_WEATHER_URL)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_backoff_factor() -> f64 {
    DEFAULT_BACKOFF_FACTOR
}

fn default_cache_expiry_secs() -> u64 {
    DEFAULT_CACHE_EXPIRY_SECS
}
