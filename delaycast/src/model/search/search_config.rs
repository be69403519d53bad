use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::model::SimulationError;

/// upper bound on the number of variants a single search may simulate.
pub const MAX_VARIANTS: usize = 10_000;

/// configures the departure shifts to search, with durations written in
/// humantime format ("15m", "4h", "1h 30m").
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// step between consecutive candidate departures
    #[serde(default = "default_shift_interval")]
    pub shift_interval: String,
    /// how far past the published departure to search
    #[serde(default = "default_shift_window")]
    pub shift_window: String,
    /// worker threads simulating variants. 0 uses one thread per core.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            shift_interval: default_shift_interval(),
            shift_window: default_shift_window(),
            parallelism: default_parallelism(),
        }
    }
}

/// validated search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParameters {
    pub shift_interval: TimeDelta,
    pub shift_window: TimeDelta,
    pub parallelism: usize,
}

impl SearchConfig {
    pub fn build(&self) -> Result<SearchParameters, SimulationError> {
        let shift_interval = parse_duration("shift_interval", &self.shift_interval)?;
        let shift_window = parse_duration("shift_window", &self.shift_window)?;
        let params = SearchParameters {
            shift_interval,
            shift_window,
            parallelism: self.parallelism,
        };
        params.variant_count()?;
        Ok(params)
    }
}

impl SearchParameters {
    /// number of candidate departures, `floor(window / interval) + 1`.
    pub fn variant_count(&self) -> Result<usize, SimulationError> {
        let interval = self.shift_interval.num_microseconds().ok_or_else(|| {
            SimulationError::InvalidSearch(String::from("shift interval is too large"))
        })?;
        let window = self.shift_window.num_microseconds().ok_or_else(|| {
            SimulationError::InvalidSearch(String::from("shift window is too large"))
        })?;
        if interval <= 0 {
            return Err(SimulationError::InvalidSearch(String::from(
                "shift interval must be greater than zero",
            )));
        }
        if window < 0 {
            return Err(SimulationError::InvalidSearch(String::from(
                "shift window must not be negative",
            )));
        }
        let count = (window / interval) as usize + 1;
        if count > MAX_VARIANTS {
            return Err(SimulationError::InvalidSearch(format!(
                "{count} variants exceed the limit of {MAX_VARIANTS}, use a larger interval or a smaller window"
            )));
        }
        Ok(count)
    }
}

fn parse_duration(key: &str, value: &str) -> Result<TimeDelta, SimulationError> {
    let duration = humantime::parse_duration(value).map_err(|e| {
        SimulationError::InvalidSearch(format!("{key} '{value}' is not a duration: {e}"))
    })?;
    TimeDelta::from_std(duration)
        .map_err(|e| SimulationError::InvalidSearch(format!("{key} '{value}' is out of range: {e}")))
}

fn default_shift_interval() -> String {
    String::from("15m")
}

fn default_shift_window() -> String {
    String::from("4h")
}

fn default_parallelism() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(interval: &str, window: &str) -> Result<SearchParameters, SimulationError> {
        SearchConfig {
            shift_interval: interval.to_string(),
            shift_window: window.to_string(),
            parallelism: 1,
        }
        .build()
    }

    #[test]
    fn test_default_search_has_17_variants() {
        let p = SearchConfig::default().build().unwrap();
        assert_eq!(p.shift_interval, TimeDelta::minutes(15));
        assert_eq!(p.shift_window, TimeDelta::hours(4));
        assert_eq!(p.variant_count().unwrap(), 17);
    }

    #[test]
    fn test_variant_count_floors() {
        assert_eq!(params("25m", "1h").unwrap().variant_count().unwrap(), 3);
        assert_eq!(params("2h", "1h").unwrap().variant_count().unwrap(), 1);
        assert_eq!(params("10m", "0s").unwrap().variant_count().unwrap(), 1);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(matches!(
            params("0s", "1h"),
            Err(SimulationError::InvalidSearch(_))
        ));
    }

    #[test]
    fn test_unparseable_duration_rejected() {
        assert!(matches!(
            params("fifteen minutes", "1h"),
            Err(SimulationError::InvalidSearch(_))
        ));
    }

    #[test]
    fn test_too_many_variants_rejected() {
        assert!(matches!(
            params("1s", "30days"),
            Err(SimulationError::InvalidSearch(_))
        ));
    }
}
