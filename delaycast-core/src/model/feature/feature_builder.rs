use indexmap::IndexMap;

use super::{fieldname, CategoryEncoding, FeatureSchema, FeatureValue, FeatureVector, RawFeatures};
use crate::model::{stop::Stop, track::TrackContext, weather::WeatherSnapshot};

/// offset between degrees Celsius and Kelvin.
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// builds the estimator input for one stop.
///
/// # Arguments
///
/// * `stop` - the published stop (calendar and location attributes)
/// * `weather` - weather sampled at the stop's forecast time
/// * `track` - track context sampled at the stop's forecast time
/// * `encoding` - categorical tables from training
/// * `schema` - feature names and order expected by the estimator
///
/// # Returns
///
/// a vector with exactly the schema's fields, never an error: unseen categories
/// encode as `-1`, absent fields become `0`.
pub fn build_feature_vector(
    stop: &Stop,
    weather: &WeatherSnapshot,
    track: &TrackContext,
    encoding: &CategoryEncoding,
    schema: &FeatureSchema,
) -> FeatureVector {
    let raw = build_raw_features(stop, weather, track);
    let encoded = encode_features(&raw, encoding);
    align(&encoded, schema)
}

/// collects the named features for a stop with unit conversions applied.
/// values that are missing upstream are left out.
pub fn build_raw_features(
    stop: &Stop,
    weather: &WeatherSnapshot,
    track: &TrackContext,
) -> RawFeatures {
    let kelvin = |c: Option<f64>| c.map(|c| FeatureValue::Float(c + CELSIUS_TO_KELVIN));
    let float = |v: Option<f64>| v.map(FeatureValue::Float);

    let entries: [(&str, Option<FeatureValue>); 18] = [
        (fieldname::TEMPERATURE, kelvin(weather.temperature)),
        (fieldname::FEELS_LIKE, kelvin(weather.feels_like)),
        (fieldname::HUMIDITY, float(weather.humidity)),
        (fieldname::PRESSURE, float(weather.pressure)),
        (fieldname::WIND_SPEED, float(weather.wind_speed)),
        (fieldname::WIND_DIRECTION, float(weather.wind_direction)),
        (fieldname::VISIBILITY, float(weather.visibility)),
        (fieldname::CLOUD_COVER, float(weather.cloud_cover)),
        (fieldname::DEW_POINT, kelvin(weather.dew_point)),
        (
            fieldname::WEATHER_CONDITION,
            Some(FeatureValue::from(weather.condition.as_str())),
        ),
        (fieldname::LATITUDE, Some(FeatureValue::Float(stop.latitude))),
        (fieldname::LONGITUDE, Some(FeatureValue::Float(stop.longitude))),
        (fieldname::ALTITUDE, float(stop.altitude)),
        (fieldname::SEA_LEVEL, float(weather.sea_level)),
        (fieldname::DAY_OF_WEEK, stop.day_of_week.clone()),
        (
            fieldname::DAY_OF_JOURNEY,
            stop.day_of_journey.map(FeatureValue::from),
        ),
        (
            fieldname::TRACKS_ON_ROUTE,
            Some(FeatureValue::Integer(track.tracks_on_route)),
        ),
        (
            fieldname::TRAINS_NEARBY,
            Some(FeatureValue::Integer(track.trains_nearby)),
        ),
    ];

    entries
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
        .collect()
}

/// converts raw features to numbers. features with a category table are
/// looked up by their string form; others are read as numbers. text that is
/// neither categorical nor numeric is encoded as an unseen category.
pub fn encode_features(raw: &RawFeatures, encoding: &CategoryEncoding) -> IndexMap<String, f64> {
    raw.iter()
        .map(|(name, value)| {
            let encoded = match encoding.encode(name, value) {
                Some(code) => code as f64,
                None => match value.as_number() {
                    Some(n) => n,
                    None => {
                        log::warn!(
                            "feature '{name}' has non-numeric value '{value}' and no category table, encoding as unseen"
                        );
                        super::UNSEEN_CATEGORY as f64
                    }
                },
            };
            (name.clone(), encoded)
        })
        .collect()
}

/// reindexes encoded features onto the estimator schema.
pub fn align(encoded: &IndexMap<String, f64>, schema: &FeatureSchema) -> FeatureVector {
    FeatureVector::aligned(encoded, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::weather::{WeatherCondition, WeatherRecord};
    use std::collections::HashMap;

    fn stop() -> Stop {
        serde_json::from_str(
            r#"{
                "station_code": "MYS",
                "station_name": "Mysuru Jn",
                "lat": 12.3164,
                "lon": 76.6455,
                "altitude": 763.0,
                "day_of_week": "Friday",
                "day_of_journey": 1,
                "scheduled_arrival": "2024-03-01 10:00:00"
            }"#,
        )
        .unwrap()
    }

    fn weather() -> WeatherSnapshot {
        let record: WeatherRecord = serde_json::from_str(
            r#"{
                "time": "2024-03-01T04:30:00Z",
                "temp": 20.0,
                "feels_like": 19.5,
                "humidity": 70.0,
                "pressure": 1010.0,
                "wind_speed": 12.0,
                "wind_deg": 180.0,
                "visibility": 24140.0,
                "clouds": 40.0,
                "dew_point": 14.0,
                "weather_code": 61
            }"#,
        )
        .unwrap();
        WeatherSnapshot::from(&record)
    }

    fn schema(names: &[&str]) -> FeatureSchema {
        FeatureSchema::new(names.iter().map(|n| n.to_string()).collect()).unwrap()
    }

    fn encoding() -> CategoryEncoding {
        CategoryEncoding::from_classes(HashMap::from([
            (
                String::from("weather_main"),
                vec![String::from("Clear"), String::from("Clouds"), String::from("Rain")],
            ),
            (
                String::from("day_of_week"),
                vec![String::from("Monday"), String::from("Sunday")],
            ),
        ]))
    }

    #[test]
    fn test_temperature_converted_to_kelvin() {
        let raw = build_raw_features(&stop(), &weather(), &TrackContext::default());
        assert_eq!(raw.get("temp"), Some(&FeatureValue::Float(293.15)));
        assert_eq!(raw.get("feels_like"), Some(&FeatureValue::Float(19.5 + 273.15)));
        assert_eq!(raw.get("dew_point"), Some(&FeatureValue::Float(14.0 + 273.15)));
        assert_eq!(raw.get("humidity"), Some(&FeatureValue::Float(70.0)));
        assert_eq!(raw.get("sea_level"), Some(&FeatureValue::Float(1010.0)));
    }

    #[test]
    fn test_raw_feature_order_and_track_context() {
        let track = TrackContext {
            tracks_on_route: 2,
            trains_nearby: 4,
        };
        let raw = build_raw_features(&stop(), &weather(), &track);
        assert_eq!(raw.len(), 18);
        assert_eq!(raw.get_index(0).map(|(k, _)| k.as_str()), Some("temp"));
        assert_eq!(raw.get("tracks_on_route"), Some(&FeatureValue::Integer(2)));
        assert_eq!(raw.get("trains_nearby"), Some(&FeatureValue::Integer(4)));
        assert_eq!(raw.get("weather_main"), Some(&FeatureValue::from("Rain")));
    }

    #[test]
    fn test_unseen_category_encodes_to_sentinel() {
        // Friday is not in the day_of_week table
        let schema = schema(&["day_of_week", "weather_main"]);
        let v = build_feature_vector(
            &stop(),
            &weather(),
            &TrackContext::default(),
            &encoding(),
            &schema,
        );
        assert_eq!(v.get("day_of_week"), Some(-1.0));
        assert_eq!(v.get("weather_main"), Some(2.0));
    }

    #[test]
    fn test_alignment_matches_schema_exactly() {
        let schema = schema(&["trains_nearby", "not_built", "temp", "lat"]);
        let v = build_feature_vector(
            &stop(),
            &weather(),
            &TrackContext::default(),
            &encoding(),
            &schema,
        );
        let names: Vec<&String> = v.names().collect();
        assert_eq!(names, schema.names().iter().collect::<Vec<_>>());
        assert_eq!(v.values(), vec![0.0, 0.0, 293.15, 12.3164]);
    }

    #[test]
    fn test_missing_upstream_fields_zero_filled() {
        let mut s = stop();
        s.altitude = None;
        s.day_of_journey = None;
        let mut w = weather();
        w.visibility = None;
        let schema = schema(&["altitude", "day_of_journey", "visibility", "clouds"]);
        let v = build_feature_vector(&s, &w, &TrackContext::default(), &encoding(), &schema);
        assert_eq!(v.values(), vec![0.0, 0.0, 0.0, 40.0]);
    }

    #[test]
    fn test_uncategorized_text_encodes_as_unseen() {
        let schema = schema(&["day_of_week"]);
        let v = build_feature_vector(
            &stop(),
            &weather(),
            &TrackContext::default(),
            &CategoryEncoding::default(),
            &schema,
        );
        assert_eq!(v.get("day_of_week"), Some(-1.0));
    }

    #[test]
    fn test_numeric_day_of_week_without_table() {
        let mut s = stop();
        s.day_of_week = Some(FeatureValue::Integer(5));
        let schema = schema(&["day_of_week"]);
        let v = build_feature_vector(
            &s,
            &weather(),
            &TrackContext::default(),
            &CategoryEncoding::default(),
            &schema,
        );
        assert_eq!(v.get("day_of_week"), Some(5.0));
        assert_eq!(weather().condition, WeatherCondition::Rain);
    }
}
