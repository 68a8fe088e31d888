use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Model unavailable: {message}")]
    ModelUnavailable { message: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimited { message: String },

    #[error("Prompt blocked by safety filters: {reason}")]
    Blocked { reason: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Network error: {source}")]
    Network { source: reqwest::Error },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl GeminiError {
    /// Only rate limits are transient; everything else abandons the call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GeminiError::RateLimited { .. })
    }

    pub fn is_rate_limit_error(&self) -> bool {
        matches!(self, GeminiError::RateLimited { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, GeminiError::Blocked { .. })
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, GeminiError::Configuration { .. })
    }

    pub fn from_reqwest_error(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            GeminiError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }
        } else {
            GeminiError::Network { source: error }
        }
    }

    pub fn from_status_and_body(status: reqwest::StatusCode, body: &str) -> Self {
        let status_code = status.as_u16();

        // The API wraps errors in {"error": {"message": ...}}; fall back to the raw body.
        let error_message =
            if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(body) {
                error_response
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or(body)
                    .to_string()
            } else {
                body.to_string()
            };

        match status_code {
            429 => GeminiError::RateLimited {
                message: error_message,
            },
            _ => GeminiError::Api {
                status: status_code,
                message: error_message,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum RetryError {
    #[error("Maximum retry attempts exceeded")]
    Exhausted,

    #[error("Non-retryable error: {source}")]
    NonRetryable { source: GeminiError },
}
