use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::hh::{Error, Result};

/// Retry behaviour for transient HTTP failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following failed attempt `attempt` (zero-based),
    /// doubling from the base.
    fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::FORBIDDEN
        || status.is_server_error()
}

/// Reusable client that retries 403/429/5xx responses and connection-level
/// failures before giving up. Any other non-success status surfaces as
/// [`Error::Status`] for the caller to interpret.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            inner: Client::new(),
            retry,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut attempt = 0;
        loop {
            let result = self.inner.get(url).query(query).send().await;
            let retryable = match &result {
                Ok(resp) => is_transient(resp.status()),
                Err(e) => e.is_connect() || e.is_timeout(),
            };
            if retryable && attempt + 1 < self.retry.max_attempts {
                let delay = self.retry.delay(attempt);
                log::warn!("transient failure for {}, retrying in {:?}", url, delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }
            let resp = result?;
            let status = resp.status();
            if !status.is_success() {
                return Err(Error::Status {
                    url: url.to_owned(),
                    status,
                });
            }
            return Ok(resp.json().await?);
        }
    }
}

// test module
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transient_statuses_are_retryable() {
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient(StatusCode::FORBIDDEN));
        assert!(is_transient(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_transient(StatusCode::BAD_GATEWAY));
        assert!(is_transient(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_transient(StatusCode::GATEWAY_TIMEOUT));
        assert!(!is_transient(StatusCode::NOT_FOUND));
        assert!(!is_transient(StatusCode::BAD_REQUEST));
        assert!(!is_transient(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn backoff_doubles_from_base() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.delay(0), Duration::from_secs(1));
        assert_eq!(retry.delay(1), Duration::from_secs(2));
        assert_eq!(retry.delay(2), Duration::from_secs(4));
    }
}
