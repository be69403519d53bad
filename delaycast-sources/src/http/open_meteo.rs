use chrono::DateTime;
use delaycast_core::{
    model::weather::WeatherRecord,
    source::{SourceError, WeatherSource},
};
use serde::Deserialize;

use super::HttpClient;

pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// 15-minute forecast variables requested from Open-Meteo, in the order
/// they map onto [`WeatherRecord`] fields.
pub const MINUTELY_15_VARIABLES: [&str; 10] = [
    "temperature_2m",
    "apparent_temperature",
    "relative_humidity_2m",
    "pressure_msl",
    "windspeed_10m",
    "winddirection_10m",
    "visibility",
    "cloudcover",
    "dew_point_2m",
    "weathercode",
];

#[derive(Debug, Clone, Deserialize)]
pub struct OpenMeteoResponse {
    #[serde(default)]
    pub minutely_15: Option<Minutely15>,
}

/// column-oriented 15-minute forecast. `time` holds unix seconds, every other
/// column is index-aligned with it and may contain nulls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Minutely15 {
    pub time: Vec<i64>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub pressure_msl: Vec<Option<f64>>,
    #[serde(default)]
    pub windspeed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub winddirection_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub visibility: Vec<Option<f64>>,
    #[serde(default)]
    pub cloudcover: Vec<Option<f64>>,
    #[serde(default)]
    pub dew_point_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub weathercode: Vec<Option<f64>>,
}

impl Minutely15 {
    /// converts the columns into one record per timestamp. timestamps outside
    /// of the representable range are dropped.
    pub fn into_records(self) -> Vec<WeatherRecord> {
        let at = |column: &Vec<Option<f64>>, idx: usize| column.get(idx).copied().flatten();
        self.time
            .iter()
            .enumerate()
            .filter_map(|(idx, secs)| {
                let time = DateTime::from_timestamp(*secs, 0)?;
                Some(WeatherRecord {
                    time,
                    temp: at(&self.temperature_2m, idx),
                    feels_like: at(&self.apparent_temperature, idx),
                    humidity: at(&self.relative_humidity_2m, idx),
                    pressure: at(&self.pressure_msl, idx),
                    wind_speed: at(&self.windspeed_10m, idx),
                    wind_deg: at(&self.winddirection_10m, idx),
                    visibility: at(&self.visibility, idx),
                    clouds: at(&self.cloudcover, idx),
                    dew_point: at(&self.dew_point_2m, idx),
                    weather_code: at(&self.weathercode, idx),
                })
            })
            .collect()
    }
}

/// weather forecasts from the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    url: String,
    client: HttpClient,
}

impl OpenMeteoSource {
    pub fn new(url: &str, client: HttpClient) -> OpenMeteoSource {
        OpenMeteoSource {
            url: url.to_string(),
            client,
        }
    }

    pub fn query(latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("minutely_15", MINUTELY_15_VARIABLES.join(",")),
            ("timezone", String::from("auto")),
            ("timeformat", String::from("unixtime")),
        ]
    }
}

impl WeatherSource for OpenMeteoSource {
    fn fetch_weather_series(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherRecord>, SourceError> {
        let id = format!("{latitude},{longitude}");
        let query = OpenMeteoSource::query(latitude, longitude);
        let response: OpenMeteoResponse =
            self.client.get_json(&self.url, &query, "weather forecast", &id)?;
        let records = response
            .minutely_15
            .map(Minutely15::into_records)
            .unwrap_or_default();
        log::debug!(
            "received {} weather forecast entries for ({id})",
            records.len()
        );
        Ok(records)
    }
}
