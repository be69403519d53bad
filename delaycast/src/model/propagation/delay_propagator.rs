use chrono_tz::Tz;
use delaycast_core::{
    model::{
        feature::build_feature_vector,
        outcome::VariantResult,
        stop::{Stop, StopSequence},
    },
    source::ConditionsResolver,
};

use super::{PropagationState, StopTimes};
use crate::model::{
    estimator::{DelayEstimator, EstimatorError},
    SimulationError,
};

/// simulates how delay accumulates stop by stop along one schedule variant.
///
/// stops are simulated strictly in route order since the time conditions are
/// sampled at for a stop depends on the delay accumulated at every stop
/// before it. a stop whose conditions cannot be resolved is skipped without
/// touching the accumulated delay.
pub struct DelayPropagator<'a> {
    estimator: &'a dyn DelayEstimator,
    conditions: &'a dyn ConditionsResolver,
    timezone: Tz,
}

impl<'a> DelayPropagator<'a> {
    pub fn new(
        estimator: &'a dyn DelayEstimator,
        conditions: &'a dyn ConditionsResolver,
        timezone: Tz,
    ) -> DelayPropagator<'a> {
        DelayPropagator {
            estimator,
            conditions,
            timezone,
        }
    }

    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    /// runs the propagation over a shifted schedule.
    ///
    /// # Arguments
    ///
    /// * `shifted` - the schedule variant that drives the forecast times
    /// * `baseline` - the published schedule, index-aligned with `shifted`. it
    ///   provides the unshifted arrival for reporting and the stop's calendar
    ///   and location attributes.
    ///
    /// # Returns
    ///
    /// the outcome of every simulated stop and the total delay, which is
    /// undefined if no stop could be simulated. estimator failures and times
    /// outside of the representable range are errors.
    pub fn simulate_variant(
        &self,
        shifted: &StopSequence,
        baseline: &StopSequence,
    ) -> Result<VariantResult, SimulationError> {
        if !shifted.is_aligned_with(baseline) {
            return Err(SimulationError::MisalignedBaseline(format!(
                "shifted schedule has {} stops, baseline has {}, or their stations differ",
                shifted.len(),
                baseline.len()
            )));
        }
        let start_time_variant = shifted.first_scheduled_arrival(&self.timezone);
        let mut state = PropagationState::new(start_time_variant);
        for (station_index, (stop, original)) in shifted.iter().zip(baseline.iter()).enumerate() {
            self.simulate_stop(station_index, stop, original, &mut state)?;
        }
        let result = state.finish();
        match result.total_delay {
            Some(total) => log::info!(
                "variant starting {} simulated {}/{} stops with total delay {total:.2} minutes",
                fmt_start(&result),
                result.outcomes.len(),
                shifted.len()
            ),
            None => log::info!(
                "variant starting {} has no simulated stops",
                fmt_start(&result)
            ),
        }
        Ok(result)
    }

    /// one step of the propagation. returns without changing the state when
    /// the stop has no usable arrival or its conditions are unavailable.
    fn simulate_stop(
        &self,
        station_index: usize,
        stop: &Stop,
        original: &Stop,
        state: &mut PropagationState,
    ) -> Result<(), SimulationError> {
        let Some(arrival) = &stop.scheduled_arrival else {
            return Ok(());
        };
        let Some(shifted_arrival) = arrival.normalize(&self.timezone) else {
            log::warn!(
                "skipping stop {station_index} ('{}'): arrival {arrival} does not exist in {}",
                stop.station_code,
                self.timezone
            );
            return Ok(());
        };
        let Some(original_arrival) = original
            .scheduled_arrival
            .and_then(|t| t.normalize(&self.timezone))
        else {
            log::warn!(
                "skipping stop {station_index} ('{}'): no published arrival",
                stop.station_code
            );
            return Ok(());
        };
        let forecast_time =
            state
                .forecast_time(&shifted_arrival)
                .ok_or_else(|| SimulationError::TimeOutOfRange {
                    station_index,
                    station_code: stop.station_code.clone(),
                })?;

        let track = match self.conditions.resolve_track_context(stop, &forecast_time) {
            Ok(track) => track,
            Err(e) => {
                log::warn!("skipping stop {station_index} ('{}'): {e}", stop.station_code);
                return Ok(());
            }
        };
        let weather = match self.conditions.resolve_weather(stop, &forecast_time) {
            Ok(weather) => weather,
            Err(e) => {
                log::warn!("skipping stop {station_index} ('{}'): {e}", stop.station_code);
                return Ok(());
            }
        };

        let features = build_feature_vector(
            original,
            &weather,
            &track,
            self.estimator.encoding(),
            self.estimator.schema(),
        );
        let predicted_delay = self.estimator.predict(&features)?;
        if !predicted_delay.is_finite() {
            return Err(SimulationError::Estimator(EstimatorError::Prediction {
                estimator: self.estimator.name().to_string(),
                message: format!(
                    "non-finite delay {predicted_delay} predicted for stop {station_index} ('{}')",
                    stop.station_code
                ),
            }));
        }

        let times = StopTimes {
            original_arrival,
            shifted_arrival,
            forecast_time,
        };
        let outcome = state
            .advance(station_index, original, times, predicted_delay)
            .ok_or_else(|| SimulationError::TimeOutOfRange {
                station_index,
                station_code: stop.station_code.clone(),
            })?;
        log::debug!(
            "stop {station_index} ('{}') forecast at {}: delay {:.2} min, cumulative {:.2} min, arriving {}",
            outcome.station_code,
            outcome.forecast_time.to_rfc3339(),
            outcome.predicted_delay,
            outcome.cumulative_delay,
            outcome.actual_arrival_predicted.to_rfc3339()
        );
        Ok(())
    }
}

fn fmt_start(result: &VariantResult) -> String {
    result
        .start_time_variant
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| String::from("<none>"))
}
