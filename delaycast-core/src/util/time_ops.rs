use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// zone that all schedule, weather and track timestamps are normalized into
/// when no other zone is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Kolkata;

const MICROSECONDS_PER_MINUTE: f64 = 60_000_000.0;

/// converts a (possibly fractional) number of minutes into a [`TimeDelta`] at
/// microsecond resolution. non-finite values produce `None`.
pub fn minutes_to_delta(minutes: f64) -> Option<TimeDelta> {
    if !minutes.is_finite() {
        return None;
    }
    let micros = (minutes * MICROSECONDS_PER_MINUTE).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(TimeDelta::microseconds(micros as i64))
}

/// converts a [`TimeDelta`] into fractional minutes.
pub fn delta_to_minutes(delta: &TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / MICROSECONDS_PER_MINUTE,
        None => delta.num_milliseconds() as f64 / 60_000.0,
    }
}

/// adds some fractional minutes to a datetime. returns `None` when the minutes
/// are not finite or the result falls outside of the representable range.
pub fn add_minutes(datetime: &DateTime<Tz>, minutes: f64) -> Option<DateTime<Tz>> {
    let delta = minutes_to_delta(minutes)?;
    datetime.checked_add_signed(delta)
}

/// interprets a zone-less datetime as wall-clock time in the target zone. for
/// ambiguous local times, the earliest instant is chosen.
pub fn localize(datetime: &NaiveDateTime, timezone: &Tz) -> Option<DateTime<Tz>> {
    timezone.from_local_datetime(datetime).earliest()
}

/// converts a zoned datetime into the target zone. the instant is unchanged.
pub fn normalize<Z: TimeZone>(datetime: &DateTime<Z>, timezone: &Tz) -> DateTime<Tz> {
    datetime.with_timezone(timezone)
}

/// absolute distance in time between two instants.
pub fn abs_distance(a: &DateTime<Tz>, b: &DateTime<Tz>) -> TimeDelta {
    a.signed_duration_since(b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_minutes_to_delta_fractional() {
        let delta = minutes_to_delta(1.5).unwrap();
        assert_eq!(delta, TimeDelta::seconds(90));
    }

    #[test]
    fn test_minutes_to_delta_non_finite() {
        assert!(minutes_to_delta(f64::NAN).is_none());
        assert!(minutes_to_delta(f64::INFINITY).is_none());
    }

    #[test]
    fn test_delta_to_minutes() {
        let minutes = delta_to_minutes(&TimeDelta::seconds(150));
        assert_eq!(minutes, 2.5);
    }

    #[test]
    fn test_localize_naive_in_kolkata() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let local = localize(&naive, &DEFAULT_TIMEZONE).unwrap();
        assert_eq!(local.to_rfc3339(), "2024-03-01T10:00:00+05:30");
    }

    #[test]
    fn test_normalize_keeps_instant() {
        let utc = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 4, 30, 0).unwrap();
        let local = normalize(&utc, &DEFAULT_TIMEZONE);
        assert_eq!(local.to_rfc3339(), "2024-03-01T10:00:00+05:30");
        assert_eq!(local, utc);
    }

    #[test]
    fn test_add_minutes() {
        let t = DEFAULT_TIMEZONE
            .with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
            .unwrap();
        let later = add_minutes(&t, 12.25).unwrap();
        assert_eq!(later.to_rfc3339(), "2024-03-01T10:12:15+05:30");
    }
}
