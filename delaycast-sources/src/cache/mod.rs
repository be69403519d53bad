mod cached_source;
mod expiring_cache;

pub use cached_source::{CachedStationSource, CachedWeatherSource};
pub use expiring_cache::{ExpiringCache, DEFAULT_CACHE_EXPIRY_SECS};
