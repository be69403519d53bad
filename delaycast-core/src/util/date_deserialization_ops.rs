use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

pub const APP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// zone-less datetime formats accepted from schedule payloads, tried in order.
pub const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// parses a zone-aware datetime, accepting both RFC 3339 (`T` separator) and
/// the space-separated variant with a numeric offset.
pub fn parse_zoned_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .ok()
}

/// parses a zone-less datetime using the first matching format in
/// [`NAIVE_DATETIME_FORMATS`].
pub fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// deserializes a timestamp that is either an RFC 3339 string or an integer
/// count of seconds since the unix epoch.
pub fn deserialize_utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => {
            let secs = n
                .as_i64()
                .ok_or_else(|| D::Error::custom(format!("invalid unix timestamp: {n}")))?;
            DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| D::Error::custom(format!("unix timestamp out of range: {secs}")))
        }
        serde_json::Value::String(s) => parse_zoned_datetime(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| parse_naive_datetime(&s).map(|n| n.and_utc()))
            .ok_or_else(|| D::Error::custom(format!("Invalid datetime format: {s}"))),
        other => Err(D::Error::custom(format!(
            "expected timestamp string or integer, found {other}"
        ))),
    }
}
