//! nearest-time lookup over time-indexed records. used to sample weather
//! forecasts and track occupancy forecasts at the moment a train is expected
//! to reach a station.
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::time_ops;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NearestTimeError {
    #[error("cannot find nearest record in an empty time series")]
    EmptySeries,
}

/// an ordered collection of records keyed by a timestamp in a single zone.
#[derive(Debug, Clone)]
pub struct TimeSeries<R> {
    entries: Vec<(DateTime<Tz>, R)>,
}

impl<R> TimeSeries<R> {
    /// wraps entries that are already normalized into one zone.
    pub fn new(entries: Vec<(DateTime<Tz>, R)>) -> TimeSeries<R> {
        TimeSeries { entries }
    }

    /// builds a series from raw records, normalizing each record's UTC
    /// timestamp into the target zone. input order is preserved.
    pub fn from_records<F>(records: Vec<R>, timezone: &Tz, timestamp: F) -> TimeSeries<R>
    where
        F: Fn(&R) -> DateTime<Utc>,
    {
        let entries = records
            .into_iter()
            .map(|r| (time_ops::normalize(&timestamp(&r), timezone), r))
            .collect();
        TimeSeries { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(DateTime<Tz>, R)] {
        &self.entries
    }

    /// the record closest in time to the target. see [`nearest`].
    pub fn nearest(&self, target: &DateTime<Tz>) -> Result<&R, NearestTimeError> {
        nearest(target, &self.entries).map(|(_, r)| r)
    }
}

/// finds the entry whose timestamp has the minimum absolute difference from
/// the target. when several entries are equally close, the first one in input
/// order wins.
///
/// # Arguments
///
/// * `target` - time to sample at
/// * `entries` - `(timestamp, record)` pairs in the same zone as `target`
///
/// # Returns
///
/// the closest entry, or [`NearestTimeError::EmptySeries`] when there are no entries.
pub fn nearest<'a, R>(
    target: &DateTime<Tz>,
    entries: &'a [(DateTime<Tz>, R)],
) -> Result<&'a (DateTime<Tz>, R), NearestTimeError> {
    entries
        .iter()
        .min_by_key(|(time, _)| time_ops::abs_distance(time, target))
        .ok_or(NearestTimeError::EmptySeries)
}
