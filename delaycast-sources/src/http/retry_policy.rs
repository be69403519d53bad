use std::time::Duration;

use delaycast_core::source::SourceError;

pub const DEFAULT_RETRIES: u32 = 5;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 0.2;

/// how often and how patiently a failed request is repeated. a request is
/// attempted at most `retries + 1` times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub retries: u32,
    /// seconds, doubled after every failed retry
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            retries: DEFAULT_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff_factor: f64) -> RetryPolicy {
        RetryPolicy {
            retries,
            backoff_factor,
        }
    }

    /// a policy that never repeats a request.
    pub fn none() -> RetryPolicy {
        RetryPolicy::new(0, 0.0)
    }

    /// time to wait before the given retry, counting from 1.
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31) as i32;
        let secs = self.backoff_factor * 2f64.powi(exponent);
        if secs.is_finite() && secs > 0.0 {
            Duration::from_secs_f64(secs)
        } else {
            Duration::ZERO
        }
    }

    /// true if `retry` may still be attempted after a failure.
    pub fn allows(&self, retry: u32) -> bool {
        retry <= self.retries
    }

    /// transport failures, throttling and server errors are worth repeating.
    pub fn is_retryable(error: &SourceError) -> bool {
        match error {
            SourceError::Request { .. } => true,
            SourceError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs_f64(0.2));
        assert_eq!(policy.backoff(2), Duration::from_secs_f64(0.4));
        assert_eq!(policy.backoff(3), Duration::from_secs_f64(0.8));
    }

    #[test]
    fn test_no_backoff_without_factor() {
        assert_eq!(RetryPolicy::none().backoff(4), Duration::ZERO);
    }

    #[test]
    fn test_allows_up_to_retries() {
        let policy = RetryPolicy::new(2, 0.1);
        assert!(policy.allows(1));
        assert!(policy.allows(2));
        assert!(!policy.allows(3));
    }

    #[test]
    fn test_retryable_errors() {
        let status = |status| SourceError::Status {
            url: String::from("u"),
            status,
        };
        assert!(RetryPolicy::is_retryable(&status(503)));
        assert!(RetryPolicy::is_retryable(&status(429)));
        assert!(!RetryPolicy::is_retryable(&status(400)));
        assert!(RetryPolicy::is_retryable(&SourceError::Request {
            url: String::from("u"),
            message: String::from("connection reset"),
        }));
        assert!(!RetryPolicy::is_retryable(&SourceError::NotFound {
            kind: String::from("train"),
            id: String::from("1"),
        }));
    }
}
