use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::date_deserialization_ops::deserialize_utc_timestamp;

/// coarse weather category derived from a WMO weather interpretation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Fog,
    Drizzle,
    Rain,
    Mist,
}

impl WeatherCondition {
    /// classifies a weather code. codes outside of the table fall back to
    /// [`WeatherCondition::Clear`].
    pub fn from_code(code: i64) -> WeatherCondition {
        match code {
            0 | 1 => WeatherCondition::Clear,
            2 | 3 => WeatherCondition::Clouds,
            45 | 48 => WeatherCondition::Fog,
            51 | 53 | 55 => WeatherCondition::Drizzle,
            61 | 63 | 65 | 80 | 81 | 82 | 95 | 96 | 99 => WeatherCondition::Rain,
            56 | 57 => WeatherCondition::Mist,
            _ => WeatherCondition::Clear,
        }
    }

    /// classifies a code as reported by a forecast feed, where it may be
    /// missing or carried as a float. anything that is not an integral code
    /// classifies as [`WeatherCondition::Clear`].
    pub fn from_raw_code(code: Option<f64>) -> WeatherCondition {
        match code {
            Some(c) if c.is_finite() && c.fract() == 0.0 => WeatherCondition::from_code(c as i64),
            _ => WeatherCondition::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Mist => "Mist",
        }
    }
}

impl Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// one entry of a weather forecast time series as delivered by a weather
/// source. temperatures are in degrees Celsius. any variable may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(deserialize_with = "deserialize_utc_timestamp")]
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_deg: Option<f64>,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub clouds: Option<f64>,
    #[serde(default)]
    pub dew_point: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<f64>,
}

/// weather conditions resolved for a stop at its forecast time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub time: DateTime<Utc>,
    /// degrees Celsius
    pub temperature: Option<f64>,
    /// degrees Celsius
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub visibility: Option<f64>,
    pub cloud_cover: Option<f64>,
    /// degrees Celsius
    pub dew_point: Option<f64>,
    pub condition: WeatherCondition,
    /// always equal to `pressure`
    pub sea_level: Option<f64>,
}

impl From<&WeatherRecord> for WeatherSnapshot {
    fn from(r: &WeatherRecord) -> Self {
        WeatherSnapshot {
            time: r.time,
            temperature: r.temp,
            feels_like: r.feels_like,
            humidity: r.humidity,
            pressure: r.pressure,
            wind_speed: r.wind_speed,
            wind_direction: r.wind_deg,
            visibility: r.visibility,
            cloud_cover: r.clouds,
            dew_point: r.dew_point,
            condition: WeatherCondition::from_raw_code(r.weather_code),
            sea_level: r.pressure,
        }
    }
}
