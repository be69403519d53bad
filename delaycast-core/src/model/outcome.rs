use chrono::DateTime;
use chrono_tz::Tz;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;

/// the simulated result at one stop of one schedule variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopOutcome {
    /// position of the stop along the route
    pub station_index: usize,
    pub station_code: String,
    pub station_name: String,
    pub original_scheduled_arrival: DateTime<Tz>,
    pub scheduled_arrival_shifted: DateTime<Tz>,
    /// time at which weather and track conditions were sampled
    pub forecast_time: DateTime<Tz>,
    /// minutes of delay added at this stop
    pub predicted_delay: f64,
    /// minutes of delay carried after this stop
    pub cumulative_delay: f64,
    pub actual_arrival_predicted: DateTime<Tz>,
    pub start_time_variant: Option<DateTime<Tz>>,
}

/// simulation trace of one schedule variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantResult {
    pub start_time_variant: Option<DateTime<Tz>>,
    pub outcomes: Vec<StopOutcome>,
    /// cumulative delay after the last simulated stop, `None` if every stop was skipped
    pub total_delay: Option<f64>,
}

impl VariantResult {
    pub fn from_outcomes(
        start_time_variant: Option<DateTime<Tz>>,
        outcomes: Vec<StopOutcome>,
    ) -> VariantResult {
        let total_delay = outcomes.last().map(|o| o.cumulative_delay);
        VariantResult {
            start_time_variant,
            outcomes,
            total_delay,
        }
    }

    pub fn has_total_delay(&self) -> bool {
        self.total_delay.is_some()
    }
}

/// variants with a defined total delay, ordered from least to most delay.
/// variants with equal delay keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ranking(Vec<VariantResult>);

impl Ranking {
    pub fn new(variants: Vec<VariantResult>) -> Ranking {
        let ranked = variants
            .into_iter()
            .filter_map(|v| v.total_delay.map(|d| (OrderedFloat(d), v)))
            .sorted_by_key(|(d, _)| *d)
            .map(|(_, v)| v)
            .collect();
        Ranking(ranked)
    }

    /// the recommended variant.
    pub fn best(&self) -> Option<&VariantResult> {
        self.0.first()
    }

    pub fn variants(&self) -> &[VariantResult] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VariantResult> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::time_ops::DEFAULT_TIMEZONE;
    use chrono::TimeZone;

    fn variant(hour: u32, delays: &[f64]) -> VariantResult {
        let start = DEFAULT_TIMEZONE
            .with_ymd_and_hms(2024, 3, 1, hour, 0, 0)
            .unwrap();
        let mut cumulative = 0.0;
        let outcomes = delays
            .iter()
            .enumerate()
            .map(|(idx, d)| {
                cumulative += d;
                StopOutcome {
                    station_index: idx,
                    station_code: format!("S{idx}"),
                    station_name: format!("Station {idx}"),
                    original_scheduled_arrival: start,
                    scheduled_arrival_shifted: start,
                    forecast_time: start,
                    predicted_delay: *d,
                    cumulative_delay: cumulative,
                    actual_arrival_predicted: start,
                    start_time_variant: Some(start),
                }
            })
            .collect();
        VariantResult::from_outcomes(Some(start), outcomes)
    }

    #[test]
    fn test_total_delay_from_last_outcome() {
        let v = variant(10, &[2.0, 0.5, 3.0]);
        assert_eq!(v.total_delay, Some(5.5));
    }

    #[test]
    fn test_no_outcomes_has_undefined_total() {
        let v = variant(10, &[]);
        assert_eq!(v.total_delay, None);
        assert!(!v.has_total_delay());
    }

    #[test]
    fn test_ranking_sorted_and_excludes_undefined() {
        let ranking = Ranking::new(vec![
            variant(10, &[4.0]),
            variant(11, &[]),
            variant(12, &[1.0, 1.0]),
            variant(13, &[0.5]),
        ]);
        let totals: Vec<f64> = ranking.iter().filter_map(|v| v.total_delay).collect();
        assert_eq!(totals, vec![0.5, 2.0, 4.0]);
        assert_eq!(ranking.best().and_then(|v| v.total_delay), Some(0.5));
    }

    #[test]
    fn test_ranking_ties_keep_input_order() {
        let first = variant(10, &[3.0]);
        let second = variant(11, &[1.0, 2.0]);
        let ranking = Ranking::new(vec![first.clone(), second.clone()]);
        assert_eq!(ranking.variants(), &[first, second]);
    }

    #[test]
    fn test_ranking_of_only_undefined_is_empty() {
        let ranking = Ranking::new(vec![variant(10, &[]), variant(11, &[])]);
        assert!(ranking.is_empty());
        assert!(ranking.best().is_none());
    }
}
