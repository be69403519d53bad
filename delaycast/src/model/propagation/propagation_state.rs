use chrono::DateTime;
use chrono_tz::Tz;
use delaycast_core::{
    model::{
        outcome::{StopOutcome, VariantResult},
        stop::Stop,
    },
    util::time_ops,
};

/// the scheduled and sampled times of one stop, normalized into the
/// simulation zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopTimes {
    pub original_arrival: DateTime<Tz>,
    pub shifted_arrival: DateTime<Tz>,
    pub forecast_time: DateTime<Tz>,
}

/// running state of a single variant simulation. the cumulative delay only
/// changes when a stop is recorded with [`PropagationState::advance`].
#[derive(Debug, Clone)]
pub struct PropagationState {
    start_time_variant: Option<DateTime<Tz>>,
    cumulative_delay: f64,
    outcomes: Vec<StopOutcome>,
}

impl PropagationState {
    pub fn new(start_time_variant: Option<DateTime<Tz>>) -> PropagationState {
        PropagationState {
            start_time_variant,
            cumulative_delay: 0.0,
            outcomes: vec![],
        }
    }

    /// minutes of delay carried into the next stop.
    pub fn cumulative_delay(&self) -> f64 {
        self.cumulative_delay
    }

    pub fn outcomes(&self) -> &[StopOutcome] {
        &self.outcomes
    }

    /// the time conditions are sampled at for a stop with this arrival.
    pub fn forecast_time(&self, shifted_arrival: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        time_ops::add_minutes(shifted_arrival, self.cumulative_delay)
    }

    /// adds a stop's predicted delay to the running total and records its
    /// outcome. if the predicted arrival is not representable, the state is
    /// left unchanged and `None` is returned.
    pub fn advance(
        &mut self,
        station_index: usize,
        stop: &Stop,
        times: StopTimes,
        predicted_delay: f64,
    ) -> Option<&StopOutcome> {
        let cumulative_delay = self.cumulative_delay + predicted_delay;
        let actual_arrival_predicted =
            time_ops::add_minutes(&times.shifted_arrival, cumulative_delay)?;
        self.cumulative_delay = cumulative_delay;
        self.outcomes.push(StopOutcome {
            station_index,
            station_code: stop.station_code.clone(),
            station_name: stop.station_name.clone(),
            original_scheduled_arrival: times.original_arrival,
            scheduled_arrival_shifted: times.shifted_arrival,
            forecast_time: times.forecast_time,
            predicted_delay,
            cumulative_delay,
            actual_arrival_predicted,
            start_time_variant: self.start_time_variant,
        });
        self.outcomes.last()
    }

    pub fn finish(self) -> VariantResult {
        VariantResult::from_outcomes(self.start_time_variant, self.outcomes)
    }
}
