//! sequential delay propagation along one schedule variant.
mod delay_propagator;
mod propagation_state;

pub use delay_propagator::DelayPropagator;
pub use propagation_state::{PropagationState, StopTimes};
