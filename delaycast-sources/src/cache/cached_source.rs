use std::{sync::Arc, time::Duration};

use delaycast_core::{
    model::{track::TrackRecord, weather::WeatherRecord},
    source::{SourceError, StationSource, WeatherSource},
};

use super::ExpiringCache;

/// caches a [`WeatherSource`] per location.
pub struct CachedWeatherSource {
    inner: Arc<dyn WeatherSource>,
    cache: ExpiringCache<Vec<WeatherRecord>>,
}

impl CachedWeatherSource {
    pub fn new(inner: Arc<dyn WeatherSource>, expiry: Duration) -> CachedWeatherSource {
        CachedWeatherSource {
            inner,
            cache: ExpiringCache::new(expiry),
        }
    }
}

impl WeatherSource for CachedWeatherSource {
    fn fetch_weather_series(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherRecord>, SourceError> {
        let key = format!("{latitude:.4},{longitude:.4}");
        self.cache.get_or_try_insert_with(&key, || {
            self.inner.fetch_weather_series(latitude, longitude)
        })
    }
}

/// caches a [`StationSource`] per station code.
pub struct CachedStationSource {
    inner: Arc<dyn StationSource>,
    cache: ExpiringCache<Vec<TrackRecord>>,
}

impl CachedStationSource {
    pub fn new(inner: Arc<dyn StationSource>, expiry: Duration) -> CachedStationSource {
        CachedStationSource {
            inner,
            cache: ExpiringCache::new(expiry),
        }
    }
}

impl StationSource for CachedStationSource {
    fn fetch_station_context(&self, station_code: &str) -> Result<Vec<TrackRecord>, SourceError> {
        self.cache.get_or_try_insert_with(station_code, || {
            self.inner.fetch_station_context(station_code)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingStations {
        calls: AtomicUsize,
    }

    impl StationSource for CountingStations {
        fn fetch_station_context(&self, _code: &str) -> Result<Vec<TrackRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct CountingWeather {
        calls: AtomicUsize,
    }

    impl WeatherSource for CountingWeather {
        fn fetch_weather_series(&self, _lat: f64, _lon: f64) -> Result<Vec<WeatherRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    #[test]
    fn test_station_requests_are_cached() {
        let inner = Arc::new(CountingStations::default());
        let cached = CachedStationSource::new(inner.clone(), Duration::from_secs(3600));
        cached.fetch_station_context("SBC").unwrap();
        cached.fetch_station_context("SBC").unwrap();
        cached.fetch_station_context("MYS").unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_weather_requests_are_cached_per_location() {
        let inner = Arc::new(CountingWeather::default());
        let cached = CachedWeatherSource::new(inner.clone(), Duration::from_secs(3600));
        cached.fetch_weather_series(12.97671, 77.5713).unwrap();
        cached.fetch_weather_series(12.97669, 77.5713).unwrap();
        cached.fetch_weather_series(12.3164, 76.6455).unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
