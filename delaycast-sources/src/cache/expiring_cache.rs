use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use delaycast_core::source::SourceError;

pub const DEFAULT_CACHE_EXPIRY_SECS: u64 = 3600;

/// thread-safe in-memory cache whose entries expire a fixed time after
/// they were stored.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    expiry: Duration,
    entries: Mutex<HashMap<String, (Instant, V)>>,
}

impl<V: Clone> ExpiringCache<V> {
    pub fn new(expiry: Duration) -> ExpiringCache<V> {
        ExpiringCache {
            expiry,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// a fresh value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<V>, SourceError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| SourceError::Internal(format!("cache lock poisoned: {e}")))?;
        let value = entries
            .get(key)
            .filter(|(stored, _)| stored.elapsed() < self.expiry)
            .map(|(_, v)| v.clone());
        Ok(value)
    }

    pub fn insert(&self, key: String, value: V) -> Result<(), SourceError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SourceError::Internal(format!("cache lock poisoned: {e}")))?;
        entries.insert(key, (Instant::now(), value));
        Ok(())
    }

    /// returns the cached value for `key` or computes and stores it. failed
    /// computations are not cached. the lock is not held while computing.
    pub fn get_or_try_insert_with<F>(&self, key: &str, op: F) -> Result<V, SourceError>
    where
        F: FnOnce() -> Result<V, SourceError>,
    {
        if let Some(value) = self.get(key)? {
            return Ok(value);
        }
        let value = op()?;
        self.insert(key.to_string(), value.clone())?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_cached() {
        let cache: ExpiringCache<i32> = ExpiringCache::new(Duration::from_secs(60));
        let first = cache.get_or_try_insert_with("k", || Ok(1)).unwrap();
        let second = cache.get_or_try_insert_with("k", || Ok(2)).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 1);
    }

    #[test]
    fn test_expired_value_is_recomputed() {
        let cache: ExpiringCache<i32> = ExpiringCache::new(Duration::ZERO);
        cache.get_or_try_insert_with("k", || Ok(1)).unwrap();
        let second = cache.get_or_try_insert_with("k", || Ok(2)).unwrap();
        assert_eq!(second, 2);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache: ExpiringCache<i32> = ExpiringCache::new(Duration::from_secs(60));
        let failed = cache.get_or_try_insert_with("k", || Err(SourceError::Internal(String::from("boom"))));
        assert!(failed.is_err());
        assert_eq!(cache.get("k").unwrap(), None);
        assert_eq!(cache.get_or_try_insert_with("k", || Ok(3)).unwrap(), 3);
    }
}
