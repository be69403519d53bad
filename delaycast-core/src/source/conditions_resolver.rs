use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;

use super::{ConditionsError, StationSource, WeatherSource};
use crate::{
    model::{stop::Stop, track::TrackContext, weather::WeatherSnapshot},
    util::nearest_time::TimeSeries,
};

/// resolves the external conditions at a stop for the time a train is
/// expected there.
pub trait ConditionsResolver: Send + Sync {
    /// weather nearest to `at` at the stop's location.
    fn resolve_weather(
        &self,
        stop: &Stop,
        at: &DateTime<Tz>,
    ) -> Result<WeatherSnapshot, ConditionsError>;

    /// track occupancy nearest to `at` at the stop's station. a station
    /// without any forecast resolves to [`TrackContext::default`].
    fn resolve_track_context(
        &self,
        stop: &Stop,
        at: &DateTime<Tz>,
    ) -> Result<TrackContext, ConditionsError>;
}

/// a [`ConditionsResolver`] backed by weather and station sources, sampling
/// their time series with the nearest-time lookup.
#[derive(Clone)]
pub struct SourceConditionsResolver {
    weather: Arc<dyn WeatherSource>,
    stations: Arc<dyn StationSource>,
}

impl SourceConditionsResolver {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        stations: Arc<dyn StationSource>,
    ) -> SourceConditionsResolver {
        SourceConditionsResolver { weather, stations }
    }
}

impl ConditionsResolver for SourceConditionsResolver {
    fn resolve_weather(
        &self,
        stop: &Stop,
        at: &DateTime<Tz>,
    ) -> Result<WeatherSnapshot, ConditionsError> {
        let records = self
            .weather
            .fetch_weather_series(stop.latitude, stop.longitude)
            .map_err(|source| ConditionsError::WeatherFetch {
                latitude: stop.latitude,
                longitude: stop.longitude,
                source,
            })?;
        let series = TimeSeries::from_records(records, &at.timezone(), |r| r.time);
        let record =
            series
                .nearest(at)
                .map_err(|_| ConditionsError::EmptyWeatherSeries {
                    latitude: stop.latitude,
                    longitude: stop.longitude,
                })?;
        Ok(WeatherSnapshot::from(record))
    }

    fn resolve_track_context(
        &self,
        stop: &Stop,
        at: &DateTime<Tz>,
    ) -> Result<TrackContext, ConditionsError> {
        match self.stations.fetch_station_context(&stop.station_code) {
            Ok(records) => Ok(TrackContext::resolve(records, at)),
            Err(e) if e.is_not_found() => {
                log::debug!(
                    "station '{}' has no occupancy forecast, using defaults",
                    stop.station_code
                );
                Ok(TrackContext::default())
            }
            Err(source) => Err(ConditionsError::StationFetch {
                station_code: stop.station_code.clone(),
                source,
            }),
        }
    }
}
