use std::sync::{Arc, Mutex};

use chrono::TimeDelta;
use chrono_tz::Tz;
use delaycast_core::{
    model::{outcome::VariantResult, stop::StopSequence},
    source::{ConditionsResolver, ScheduleSource},
};
use kdam::{Bar, BarExt};
use rayon::prelude::*;

use super::{SearchOutcome, SearchParameters};
use crate::model::{estimator::DelayEstimator, propagation::DelayPropagator, SimulationError};

/// simulates a train's schedule shifted to a range of departure times and
/// ranks the shifts by their total predicted delay.
pub struct VariantSearch<'a> {
    schedules: &'a dyn ScheduleSource,
    propagator: DelayPropagator<'a>,
}

impl<'a> VariantSearch<'a> {
    pub fn new(
        schedules: &'a dyn ScheduleSource,
        estimator: &'a dyn DelayEstimator,
        conditions: &'a dyn ConditionsResolver,
        timezone: Tz,
    ) -> VariantSearch<'a> {
        VariantSearch {
            schedules,
            propagator: DelayPropagator::new(estimator, conditions, timezone),
        }
    }

    /// the published schedule of a train. a train without any scheduled
    /// arrival cannot be simulated.
    pub fn fetch_schedule(&self, train_id: &str) -> Result<StopSequence, SimulationError> {
        let schedule = self.schedules.fetch_schedule(train_id).map_err(|source| {
            SimulationError::ScheduleFetch {
                train_id: train_id.to_string(),
                source,
            }
        })?;
        if schedule
            .first_scheduled_arrival(self.propagator.timezone())
            .is_none()
        {
            return Err(SimulationError::EmptySchedule(train_id.to_string()));
        }
        Ok(schedule)
    }

    /// simulates every candidate departure of a train.
    ///
    /// # Arguments
    ///
    /// * `train_id` - train to fetch the schedule of
    /// * `params` - shift interval, window and worker count
    ///
    /// # Returns
    ///
    /// all variants in candidate order along with the ranking of those that
    /// have a total delay. fails if the schedule cannot be fetched.
    pub fn search_variants(
        &self,
        train_id: &str,
        params: &SearchParameters,
    ) -> Result<SearchOutcome, SimulationError> {
        let base = self.fetch_schedule(train_id)?;
        let offsets = candidate_offsets(params)?;
        log::info!(
            "searching {} departure variants of train {train_id} every {} over {}",
            offsets.len(),
            fmt_delta(&params.shift_interval),
            fmt_delta(&params.shift_window)
        );
        let variants = run_variants(&self.propagator, &base, &offsets, params.parallelism)?;
        let outcome = SearchOutcome::new(train_id, variants);
        match &outcome.best {
            Some(best) => log::info!(
                "best of {} ranked variants of train {train_id} starts {} with total delay {:.2} minutes",
                outcome.ranking.len(),
                best.start_time_variant
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                best.total_delay.unwrap_or_default()
            ),
            None => log::warn!(
                "none of the {} variants of train {train_id} could be simulated",
                outcome.variant_count
            ),
        }
        Ok(outcome)
    }

    /// simulates the published schedule of a train without any shift.
    pub fn simulate_original_variant(
        &self,
        train_id: &str,
    ) -> Result<VariantResult, SimulationError> {
        let schedule = self.fetch_schedule(train_id)?;
        self.propagator.simulate_variant(&schedule, &schedule)
    }
}

/// offsets from the published departure of every candidate variant: zero,
/// then one interval after another until the window is exhausted.
pub fn candidate_offsets(params: &SearchParameters) -> Result<Vec<TimeDelta>, SimulationError> {
    let count = params.variant_count()?;
    (0..count)
        .map(|i| {
            i32::try_from(i)
                .ok()
                .and_then(|i| params.shift_interval.checked_mul(i))
                .ok_or_else(|| {
                    SimulationError::InvalidSearch(format!("candidate offset {i} is out of range"))
                })
        })
        .collect()
}

/// simulates the base schedule shifted by each offset on a pool of
/// `parallelism` workers. results are returned in offset order.
pub fn run_variants(
    propagator: &DelayPropagator,
    base: &StopSequence,
    offsets: &[TimeDelta],
    parallelism: usize,
) -> Result<Vec<VariantResult>, SimulationError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()
        .map_err(|e| SimulationError::Worker(format!("failure building thread pool: {e}")))?;
    let bar = Arc::new(Mutex::new(
        Bar::builder()
            .desc("simulate variants")
            .total(offsets.len())
            .build()
            .map_err(|e| SimulationError::Worker(format!("failure building progress bar: {e}")))?,
    ));

    let results: Vec<Result<VariantResult, SimulationError>> = pool.install(|| {
        offsets
            .par_iter()
            .map(|offset| {
                let result = simulate_offset(propagator, base, offset);
                if let Ok(mut bar) = bar.clone().lock() {
                    let _ = bar.update(1);
                }
                result
            })
            .collect()
    });
    eprintln!();

    results.into_iter().collect()
}

fn simulate_offset(
    propagator: &DelayPropagator,
    base: &StopSequence,
    offset: &TimeDelta,
) -> Result<VariantResult, SimulationError> {
    let shifted = base.shifted(offset).ok_or_else(|| {
        SimulationError::InvalidSearch(format!(
            "shifting by {} leaves the representable time range",
            fmt_delta(offset)
        ))
    })?;
    propagator.simulate_variant(&shifted, base)
}

fn fmt_delta(delta: &TimeDelta) -> String {
    match delta.to_std() {
        Ok(d) => humantime::format_duration(d).to_string(),
        Err(_) => delta.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Timelike, Utc};
    use delaycast_core::{
        model::{
            feature::{CategoryEncoding, FeatureSchema, FeatureVector},
            stop::Stop,
            track::TrackContext,
            weather::{WeatherRecord, WeatherSnapshot},
        },
        source::{ConditionsError, SourceError},
        util::time_ops::DEFAULT_TIMEZONE,
    };

    use crate::model::{estimator::EstimatorError, search::SearchConfig};

    /// predicts `trains_nearby` minutes of delay
    struct TrainsEstimator {
        schema: FeatureSchema,
        encoding: CategoryEncoding,
    }

    impl TrainsEstimator {
        fn new() -> TrainsEstimator {
            TrainsEstimator {
                schema: FeatureSchema::new(vec![String::from("trains_nearby")]).unwrap(),
                encoding: CategoryEncoding::default(),
            }
        }
    }

    impl DelayEstimator for TrainsEstimator {
        fn name(&self) -> &str {
            "trains"
        }

        fn schema(&self) -> &FeatureSchema {
            &self.schema
        }

        fn encoding(&self) -> &CategoryEncoding {
            &self.encoding
        }

        fn predict(&self, features: &FeatureVector) -> Result<f64, EstimatorError> {
            Ok(features.get("trains_nearby").unwrap_or_default())
        }
    }

    /// trains nearby is the quarter of the hour of the forecast time. there is
    /// no weather from 11:00 on.
    struct ClockConditions;

    impl ConditionsResolver for ClockConditions {
        fn resolve_weather(
            &self,
            stop: &Stop,
            at: &DateTime<Tz>,
        ) -> Result<WeatherSnapshot, ConditionsError> {
            if at.hour() >= 11 {
                return Err(ConditionsError::EmptyWeatherSeries {
                    latitude: stop.latitude,
                    longitude: stop.longitude,
                });
            }
            let record = WeatherRecord {
                time: at.with_timezone(&Utc),
                temp: None,
                feels_like: None,
                humidity: None,
                pressure: None,
                wind_speed: None,
                wind_deg: None,
                visibility: None,
                clouds: None,
                dew_point: None,
                weather_code: None,
            };
            Ok(WeatherSnapshot::from(&record))
        }

        fn resolve_track_context(
            &self,
            _stop: &Stop,
            at: &DateTime<Tz>,
        ) -> Result<TrackContext, ConditionsError> {
            Ok(TrackContext {
                tracks_on_route: 1,
                trains_nearby: (at.minute() / 15) as i64,
            })
        }
    }

    struct FakeSchedules;

    impl ScheduleSource for FakeSchedules {
        fn fetch_schedule(&self, train_id: &str) -> Result<StopSequence, SourceError> {
            let stop = |code: &str, arrival: Option<&str>| Stop {
                station_code: code.to_string(),
                station_name: code.to_string(),
                latitude: 12.0,
                longitude: 77.0,
                altitude: None,
                scheduled_arrival: arrival.map(|a| a.parse().unwrap()),
                day_of_week: None,
                day_of_journey: None,
            };
            match train_id {
                "100" => Ok(StopSequence::new(vec![
                    stop("A", Some("2024-03-01 10:00:00")),
                    stop("B", Some("2024-03-01 10:30:00")),
                ])),
                "200" => Ok(StopSequence::new(vec![stop("A", None), stop("B", None)])),
                _ => Err(SourceError::NotFound {
                    kind: String::from("train"),
                    id: train_id.to_string(),
                }),
            }
        }
    }

    fn params(interval: &str, window: &str, parallelism: usize) -> SearchParameters {
        SearchConfig {
            shift_interval: interval.to_string(),
            shift_window: window.to_string(),
            parallelism,
        }
        .build()
        .unwrap()
    }

    #[test]
    fn test_candidate_offsets() {
        let offsets = candidate_offsets(&params("15m", "1h", 1)).unwrap();
        let minutes: Vec<i64> = offsets.iter().map(|o| o.num_minutes()).collect();
        assert_eq!(minutes, vec![0, 15, 30, 45, 60]);
    }

    #[test]
    fn test_search_ranks_variants() {
        let estimator = TrainsEstimator::new();
        let search = VariantSearch::new(&FakeSchedules, &estimator, &ClockConditions, DEFAULT_TIMEZONE);
        let outcome = search.search_variants("100", &params("15m", "1h", 2)).unwrap();

        assert_eq!(outcome.train_id, "100");
        assert_eq!(outcome.variant_count, 5);
        let totals: Vec<Option<f64>> = outcome.variants.iter().map(|v| v.total_delay).collect();
        assert_eq!(totals, vec![Some(2.0), Some(4.0), Some(2.0), Some(3.0), None]);

        // ties keep candidate order, undefined totals are excluded
        let ranked: Vec<String> = outcome
            .ranking
            .iter()
            .filter_map(|v| v.start_time_variant.map(|t| t.format("%H:%M").to_string()))
            .collect();
        assert_eq!(ranked, vec!["10:00", "10:30", "10:45", "10:15"]);
        let best = outcome.best.unwrap();
        assert_eq!(best.total_delay, Some(2.0));
        assert_eq!(
            best.start_time_variant.map(|t| t.to_rfc3339()),
            Some(String::from("2024-03-01T10:00:00+05:30"))
        );
    }

    #[test]
    fn test_variant_count_matches_window() {
        let estimator = TrainsEstimator::new();
        let search = VariantSearch::new(&FakeSchedules, &estimator, &ClockConditions, DEFAULT_TIMEZONE);
        for (interval, window, expected) in [("15m", "4h", 17), ("20m", "50m", 3), ("1h", "0s", 1)] {
            let outcome = search
                .search_variants("100", &params(interval, window, 1))
                .unwrap();
            assert_eq!(outcome.variant_count, expected);
            assert_eq!(outcome.variants.len(), expected);
            let totals: Vec<f64> = outcome.ranking.iter().filter_map(|v| v.total_delay).collect();
            assert_eq!(totals.len(), outcome.ranking.len());
            assert!(totals.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_parallel_and_sequential_searches_agree() {
        let estimator = TrainsEstimator::new();
        let search = VariantSearch::new(&FakeSchedules, &estimator, &ClockConditions, DEFAULT_TIMEZONE);
        let sequential = search.search_variants("100", &params("5m", "2h", 1)).unwrap();
        let parallel = search.search_variants("100", &params("5m", "2h", 4)).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_schedule_fetch_failure_names_train() {
        let estimator = TrainsEstimator::new();
        let search = VariantSearch::new(&FakeSchedules, &estimator, &ClockConditions, DEFAULT_TIMEZONE);
        let result = search.search_variants("999", &params("15m", "1h", 1));
        match result {
            Err(SimulationError::ScheduleFetch { train_id, source }) => {
                assert_eq!(train_id, "999");
                assert!(source.is_not_found());
            }
            other => panic!("expected schedule fetch error, found {other:?}"),
        }
    }

    #[test]
    fn test_schedule_without_arrivals_is_rejected() {
        let estimator = TrainsEstimator::new();
        let search = VariantSearch::new(&FakeSchedules, &estimator, &ClockConditions, DEFAULT_TIMEZONE);
        let result = search.search_variants("200", &params("15m", "1h", 1));
        assert!(matches!(result, Err(SimulationError::EmptySchedule(_))));
    }

    #[test]
    fn test_simulate_original_variant() {
        let estimator = TrainsEstimator::new();
        let search = VariantSearch::new(&FakeSchedules, &estimator, &ClockConditions, DEFAULT_TIMEZONE);
        let result = search.simulate_original_variant("100").unwrap();
        assert_eq!(result.total_delay, Some(2.0));
        for outcome in result.outcomes.iter() {
            assert_eq!(outcome.original_scheduled_arrival, outcome.scheduled_arrival_shifted);
        }
    }
}
