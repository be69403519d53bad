use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::util::{date_deserialization_ops::deserialize_utc_timestamp, nearest_time::TimeSeries};

/// tracks on route assumed when a station publishes no occupancy forecast.
pub const DEFAULT_TRACKS_ON_ROUTE: i64 = 1;
/// trains nearby assumed when a station publishes no occupancy forecast.
pub const DEFAULT_TRAINS_NEARBY: i64 = 0;

/// one entry of a station's track occupancy forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    #[serde(deserialize_with = "deserialize_utc_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub tracks_on_route: Option<i64>,
    #[serde(default)]
    pub trains_nearby: Option<i64>,
    #[serde(default)]
    pub maintenance_type: Option<String>,
}

/// track and traffic context at a station for the time a train reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackContext {
    pub tracks_on_route: i64,
    pub trains_nearby: i64,
}

impl Default for TrackContext {
    fn default() -> Self {
        TrackContext {
            tracks_on_route: DEFAULT_TRACKS_ON_ROUTE,
            trains_nearby: DEFAULT_TRAINS_NEARBY,
        }
    }
}

impl From<&TrackRecord> for TrackContext {
    fn from(r: &TrackRecord) -> Self {
        TrackContext {
            tracks_on_route: r.tracks_on_route.unwrap_or(DEFAULT_TRACKS_ON_ROUTE),
            trains_nearby: r.trains_nearby.unwrap_or(DEFAULT_TRAINS_NEARBY),
        }
    }
}

impl TrackContext {
    /// samples the occupancy forecast nearest to `at`. a station without any
    /// forecast entries gets the default context instead of an error.
    pub fn resolve(records: Vec<TrackRecord>, at: &DateTime<Tz>) -> TrackContext {
        let series = TimeSeries::from_records(records, &at.timezone(), |r| r.timestamp);
        match series.nearest(at) {
            Ok(record) => TrackContext::from(record),
            Err(_) => TrackContext::default(),
        }
    }
}
