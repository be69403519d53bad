mod conditions_error;
mod conditions_resolver;
mod data_source;
mod source_error;

pub use conditions_error::ConditionsError;
pub use conditions_resolver::{ConditionsResolver, SourceConditionsResolver};
pub use data_source::{ScheduleSource, StationSource, WeatherSource};
pub use source_error::SourceError;
