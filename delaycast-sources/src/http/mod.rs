mod http_client;
mod open_meteo;
mod railway_api;
mod retry_policy;

pub use http_client::{check_status, HttpClient, DEFAULT_TIMEOUT_SECS};
pub use open_meteo::{
    Minutely15, OpenMeteoResponse, OpenMeteoSource, DEFAULT_WEATHER_URL, MINUTELY_15_VARIABLES,
};
pub use railway_api::{RailwayApiSource, StationResponse, TrainScheduleResponse, DEFAULT_API_BASE_URL};
pub use retry_policy::{RetryPolicy, DEFAULT_BACKOFF_FACTOR, DEFAULT_RETRIES};
