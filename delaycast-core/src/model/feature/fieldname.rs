//! feature names produced by the feature builder. these match the column
//! names the delay estimators were trained on.

pub const TEMPERATURE: &str = "temp";
pub const FEELS_LIKE: &str = "feels_like";
pub const HUMIDITY: &str = "humidity";
pub const PRESSURE: &str = "pressure";
pub const WIND_SPEED: &str = "wind_speed";
pub const WIND_DIRECTION: &str = "wind_deg";
pub const VISIBILITY: &str = "visibility";
pub const CLOUD_COVER: &str = "clouds";
pub const DEW_POINT: &str = "dew_point";
pub const WEATHER_CONDITION: &str = "weather_main";
pub const LATITUDE: &str = "lat";
pub const LONGITUDE: &str = "lon";
pub const ALTITUDE: &str = "altitude";
pub const SEA_LEVEL: &str = "sea_level";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const DAY_OF_JOURNEY: &str = "day_of_journey";
pub const TRACKS_ON_ROUTE: &str = "tracks_on_route";
pub const TRAINS_NEARBY: &str = "trains_nearby";
