use crate::model::{stop::StopSequence, track::TrackRecord, weather::WeatherRecord};

use super::SourceError;

/// provides the published stop sequence of a train.
pub trait ScheduleSource: Send + Sync {
    /// fetches the stops of a train in route order.
    fn fetch_schedule(&self, train_id: &str) -> Result<StopSequence, SourceError>;
}

/// provides track occupancy forecasts per station.
pub trait StationSource: Send + Sync {
    /// fetches a station's occupancy forecast. an empty list means the
    /// station publishes no forecast.
    fn fetch_station_context(&self, station_code: &str) -> Result<Vec<TrackRecord>, SourceError>;
}

/// provides weather forecast time series per location.
pub trait WeatherSource: Send + Sync {
    fn fetch_weather_series(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherRecord>, SourceError>;
}
