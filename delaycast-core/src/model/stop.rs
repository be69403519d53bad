use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    model::feature::FeatureValue,
    util::{date_deserialization_ops as dd_ops, time_ops},
};

/// a scheduled arrival as published by the schedule source. payloads carry
/// either zone-aware timestamps or wall-clock times without a zone, and the
/// two are only reconciled when normalized into the simulation zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScheduledTime {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

impl ScheduledTime {
    /// resolves this arrival as an instant in the target zone. zone-aware
    /// values are converted, zone-less values are interpreted as wall-clock
    /// time in the target zone.
    pub fn normalize(&self, timezone: &Tz) -> Option<DateTime<Tz>> {
        match self {
            ScheduledTime::Zoned(dt) => Some(time_ops::normalize(dt, timezone)),
            ScheduledTime::Local(naive) => time_ops::localize(naive, timezone),
        }
    }

    /// moves this arrival by some offset, keeping its representation.
    pub fn shifted(&self, offset: &TimeDelta) -> Option<ScheduledTime> {
        match self {
            ScheduledTime::Zoned(dt) => dt.checked_add_signed(*offset).map(ScheduledTime::Zoned),
            ScheduledTime::Local(naive) => {
                naive.checked_add_signed(*offset).map(ScheduledTime::Local)
            }
        }
    }
}

impl FromStr for ScheduledTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(zoned) = dd_ops::parse_zoned_datetime(trimmed) {
            return Ok(ScheduledTime::Zoned(zoned));
        }
        dd_ops::parse_naive_datetime(trimmed)
            .map(ScheduledTime::Local)
            .ok_or_else(|| format!("unrecognized scheduled arrival timestamp '{s}'"))
    }
}

impl TryFrom<String> for ScheduledTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ScheduledTime::from_str(&value)
    }
}

impl From<ScheduledTime> for String {
    fn from(value: ScheduledTime) -> Self {
        value.to_string()
    }
}

impl Display for ScheduledTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduledTime::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
            ScheduledTime::Local(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// one scheduled station visit on a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub station_code: String,
    #[serde(default)]
    pub station_name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub scheduled_arrival: Option<ScheduledTime>,
    /// published day of week, either a label ("Monday") or a number
    #[serde(default)]
    pub day_of_week: Option<FeatureValue>,
    /// ordinal day of a multi-day trip, starting at 1
    #[serde(default)]
    pub day_of_journey: Option<u32>,
}

impl Stop {
    /// copy of this stop with its scheduled arrival moved by `offset`. the
    /// calendar attributes stay those of the published stop.
    pub fn shifted(&self, offset: &TimeDelta) -> Option<Stop> {
        let scheduled_arrival = match &self.scheduled_arrival {
            None => None,
            Some(t) => Some(t.shifted(offset)?),
        };
        Some(Stop {
            scheduled_arrival,
            ..self.clone()
        })
    }
}

/// stops of a single train in route order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopSequence {
    stops: Vec<Stop>,
}

impl StopSequence {
    pub fn new(stops: Vec<Stop>) -> StopSequence {
        StopSequence { stops }
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stop> {
        self.stops.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// the first scheduled arrival along the route that resolves in the target zone.
    pub fn first_scheduled_arrival(&self, timezone: &Tz) -> Option<DateTime<Tz>> {
        self.stops
            .iter()
            .filter_map(|s| s.scheduled_arrival.as_ref())
            .find_map(|t| t.normalize(timezone))
    }

    /// a new sequence where every scheduled arrival is advanced by the same
    /// offset. returns `None` if any arrival would leave the representable range.
    pub fn shifted(&self, offset: &TimeDelta) -> Option<StopSequence> {
        let stops = self
            .stops
            .iter()
            .map(|s| s.shifted(offset))
            .collect::<Option<Vec<_>>>()?;
        Some(StopSequence { stops })
    }

    /// true when both sequences list the same stations in the same order.
    pub fn is_aligned_with(&self, other: &StopSequence) -> bool {
        self.stops.len() == other.stops.len()
            && self
                .stops
                .iter()
                .zip(other.stops.iter())
                .all(|(a, b)| a.station_code == b.station_code)
    }
}

impl From<Vec<Stop>> for StopSequence {
    fn from(stops: Vec<Stop>) -> Self {
        StopSequence::new(stops)
    }
}

impl<'a> IntoIterator for &'a StopSequence {
    type Item = &'a Stop;
    type IntoIter = std::slice::Iter<'a, Stop>;

    fn into_iter(self) -> Self::IntoIter {
        self.stops.iter()
    }
}
