use std::time::Duration;

use delaycast_core::source::SourceError;
use reqwest::{blocking, StatusCode};
use serde::de::DeserializeOwned;

use super::RetryPolicy;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// blocking JSON client with a request timeout and retries.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: blocking::Client,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Result<HttpClient, SourceError> {
        let client = blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Internal(format!("failed to create HTTP client: {e}")))?;
        Ok(HttpClient { client, retry })
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// GETs a JSON document, repeating the request on retryable failures.
    ///
    /// # Arguments
    ///
    /// * `url` - resource location
    /// * `query` - query parameters
    /// * `kind` - kind of resource, used when reporting a 404
    /// * `id` - resource identifier, used when reporting a 404
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        kind: &str,
        id: &str,
    ) -> Result<T, SourceError> {
        let mut retry = 0;
        loop {
            match self.try_get_json(url, query, kind, id) {
                Err(e) if RetryPolicy::is_retryable(&e) && self.retry.allows(retry + 1) => {
                    retry += 1;
                    let wait = self.retry.backoff(retry);
                    log::warn!(
                        "{e}; retry {retry}/{} in {}",
                        self.retry.retries,
                        humantime::format_duration(wait)
                    );
                    std::thread::sleep(wait);
                }
                result => return result,
            }
        }
    }

    fn try_get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        kind: &str,
        id: &str,
    ) -> Result<T, SourceError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| SourceError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        check_status(url, response.status(), kind, id)?;
        response.json::<T>().map_err(|e| SourceError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// maps a non-success status to an error. a 404 names the missing resource.
pub fn check_status(url: &str, status: StatusCode, kind: &str, id: &str) -> Result<(), SourceError> {
    if status.is_success() {
        Ok(())
    } else if status == StatusCode::NOT_FOUND {
        Err(SourceError::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        })
    } else {
        Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}
