use delaycast_core::{
    model::{
        stop::{Stop, StopSequence},
        track::TrackRecord,
    },
    source::{ScheduleSource, SourceError, StationSource},
};
use serde::Deserialize;

use super::HttpClient;

pub const DEFAULT_API_BASE_URL: &str =
    "https://railway-rescheduling-automation-system.onrender.com/api";

/// body of `GET {base}/trains/{train_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainScheduleResponse {
    pub schedule: Vec<Stop>,
}

/// body of `GET {base}/stations/{station_code}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationResponse {
    #[serde(default)]
    pub forecasts: Vec<TrackRecord>,
}

/// schedules and station occupancy forecasts from the railway REST API.
#[derive(Debug, Clone)]
pub struct RailwayApiSource {
    base_url: String,
    client: HttpClient,
}

impl RailwayApiSource {
    pub fn new(base_url: &str, client: HttpClient) -> RailwayApiSource {
        RailwayApiSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn train_url(&self, train_id: &str) -> String {
        format!("{}/trains/{}", self.base_url, train_id)
    }

    pub fn station_url(&self, station_code: &str) -> String {
        format!("{}/stations/{}", self.base_url, station_code)
    }
}

impl ScheduleSource for RailwayApiSource {
    fn fetch_schedule(&self, train_id: &str) -> Result<StopSequence, SourceError> {
        let url = self.train_url(train_id);
        log::debug!("fetching schedule of train {train_id} from {url}");
        let response: TrainScheduleResponse = self.client.get_json(&url, &[], "train", train_id)?;
        Ok(StopSequence::new(response.schedule))
    }
}

impl StationSource for RailwayApiSource {
    fn fetch_station_context(&self, station_code: &str) -> Result<Vec<TrackRecord>, SourceError> {
        let url = self.station_url(station_code);
        let response: StationResponse = self.client.get_json(&url, &[], "station", station_code)?;
        Ok(response.forecasts)
    }
}
