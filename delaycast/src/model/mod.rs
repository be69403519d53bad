pub mod estimator;
pub mod propagation;
pub mod search;
mod simulation_error;

pub use simulation_error::SimulationError;
