use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

use super::errors::{GeminiError, RetryError};

/// Wait applied when a rate-limit error carries no usable delay hint.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 60;

lazy_static! {
    static ref RETRY_DELAY_RE: Regex =
        Regex::new(r"retry_delay.*?seconds: (\d+)").expect("retry delay pattern is valid");
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_secs(120),
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }
}

/// Extract the server-suggested wait from an error message, e.g.
/// "... retry_delay { seconds: 30 }". Defaults to 60 when absent.
pub fn parse_retry_delay(error_message: &str) -> u64 {
    RETRY_DELAY_RE
        .captures(error_message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_RETRY_DELAY_SECS)
}

/// Wait before the next attempt: the server hint, floored at
/// base_delay scaled by how many attempts have already failed.
pub fn backoff_delay(error_message: &str, base_delay: Duration, attempt: usize) -> Duration {
    let scaled = base_delay.as_secs() * (attempt as u64 + 1);
    Duration::from_secs(parse_retry_delay(error_message).max(scaled))
}

/// Run `operation` up to `max_retries` times, sleeping between rate-limited
/// attempts. Non-retryable errors end the call immediately; the last failed
/// attempt does not wait.
pub async fn with_retry<F, Fut, T>(config: RetryConfig, mut operation: F) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, GeminiError>>,
{
    for attempt in 0..config.max_retries {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() => {
                if attempt + 1 == config.max_retries {
                    break;
                }

                let delay = backoff_delay(&error.to_string(), config.base_delay, attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_retries = config.max_retries,
                    delay_secs = delay.as_secs(),
                    "Rate limited: {}. Waiting before retry",
                    error
                );

                tokio::time::sleep(delay).await;
            }
            Err(error) => return Err(RetryError::NonRetryable { source: error }),
        }
    }

    tracing::error!(
        max_retries = config.max_retries,
        "Maximum retry attempts reached"
    );
    Err(RetryError::Exhausted)
}
