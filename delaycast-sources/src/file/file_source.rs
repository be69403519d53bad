use std::path::{Path, PathBuf};

use delaycast_core::{
    model::{stop::StopSequence, track::TrackRecord, weather::WeatherRecord},
    source::{ScheduleSource, SourceError, StationSource, WeatherSource},
};
use serde::de::DeserializeOwned;

use crate::http::{StationResponse, TrainScheduleResponse};

/// schedules, station forecasts and weather forecasts read from a directory
/// of JSON documents:
///
/// ```text
/// {directory}/trains/{train_id}.json        same body as the railway API
/// {directory}/stations/{station_code}.json  same body as the railway API
/// {directory}/weather/{lat}_{lon}.json      array of weather records
/// ```
///
/// coordinates in weather file names are rendered with four decimals.
#[derive(Debug, Clone)]
pub struct FileSource {
    directory: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(directory: P) -> FileSource {
        FileSource {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn train_path(&self, train_id: &str) -> PathBuf {
        self.directory.join("trains").join(format!("{train_id}.json"))
    }

    pub fn station_path(&self, station_code: &str) -> PathBuf {
        self.directory
            .join("stations")
            .join(format!("{station_code}.json"))
    }

    pub fn weather_path(&self, latitude: f64, longitude: f64) -> PathBuf {
        self.directory
            .join("weather")
            .join(format!("{latitude:.4}_{longitude:.4}.json"))
    }
}

impl ScheduleSource for FileSource {
    fn fetch_schedule(&self, train_id: &str) -> Result<StopSequence, SourceError> {
        let path = self.train_path(train_id);
        if !path.exists() {
            return Err(SourceError::NotFound {
                kind: String::from("train"),
                id: train_id.to_string(),
            });
        }
        let response: TrainScheduleResponse = read_json(&path)?;
        Ok(StopSequence::new(response.schedule))
    }
}

impl StationSource for FileSource {
    fn fetch_station_context(&self, station_code: &str) -> Result<Vec<TrackRecord>, SourceError> {
        let path = self.station_path(station_code);
        if !path.exists() {
            return Ok(vec![]);
        }
        let response: StationResponse = read_json(&path)?;
        Ok(response.forecasts)
    }
}

impl WeatherSource for FileSource {
    fn fetch_weather_series(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherRecord>, SourceError> {
        let path = self.weather_path(latitude, longitude);
        if !path.exists() {
            return Err(SourceError::NotFound {
                kind: String::from("weather forecast"),
                id: format!("{latitude:.4},{longitude:.4}"),
            });
        }
        read_json(&path)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SourceError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| SourceError::Decode {
        url: path.to_string_lossy().to_string(),
        message: e.to_string(),
    })
}
