use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error, warn};

use super::errors::{GeminiError, RetryError};
use super::models::{
    GeminiModel, GenerateContentRequest, GenerateContentResponse, ListModelsResponse,
};
use super::retry::{with_retry, RetryConfig};
use crate::env::apis as env_vars;

const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const REQUEST_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub max_retries: usize,
    pub base_delay: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: GEMINI_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECONDS),
            max_retries: 5,
            base_delay: Duration::from_secs(120),
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }

    /// Read the API key from the environment. A missing key is a fatal
    /// configuration error.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var(env_vars::GOOGLE_API_KEY).map_err(|_| {
            GeminiError::Configuration {
                message: format!(
                    "environment variable '{}' is not set",
                    env_vars::GOOGLE_API_KEY
                ),
            }
        })?;

        Ok(Self::new(api_key))
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn validate(&self) -> Result<(), GeminiError> {
        if self.api_key.is_empty() {
            return Err(GeminiError::Configuration {
                message: "API key is required".to_string(),
            });
        }

        if self.base_url.is_empty() {
            return Err(GeminiError::Configuration {
                message: "Base URL cannot be empty".to_string(),
            });
        }

        if self.model.is_empty() {
            return Err(GeminiError::Configuration {
                message: "Model name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeminiError::Configuration {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self, GeminiError> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// List the models this key can access. Failures here are treated as the
    /// model being unavailable, which is fatal at startup.
    pub async fn list_models(&self) -> Result<Vec<GeminiModel>, GeminiError> {
        let url = format!("{}/models", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| GeminiError::ModelUnavailable {
                message: format!("failed to list models: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());
            return Err(GeminiError::ModelUnavailable {
                message: format!("HTTP {status}: {body}"),
            });
        }

        let listing: ListModelsResponse =
            response
                .json()
                .await
                .map_err(|e| GeminiError::ModelUnavailable {
                    message: format!("failed to parse model listing: {e}"),
                })?;

        Ok(listing.models)
    }

    /// Check that the configured model appears in the listing.
    pub async fn ensure_model_available(&self) -> Result<Vec<GeminiModel>, GeminiError> {
        let models = self.list_models().await?;

        if !models
            .iter()
            .any(|model| model.short_name() == self.config.model)
        {
            return Err(GeminiError::ModelUnavailable {
                message: format!("model '{}' not found in listing", self.config.model),
            });
        }

        Ok(models)
    }

    /// Non-streaming generateContent call wrapped in the rate-limit retry
    /// loop. A safety block is raised inside the attempt and never retried.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let retry_config =
            RetryConfig::new(self.config.max_retries).with_base_delay(self.config.base_delay);

        with_retry(retry_config, || {
            self.generate_content_once(request.clone())
        })
        .await
        .map_err(|retry_error| match retry_error {
            RetryError::NonRetryable { source } => source,
            RetryError::Exhausted => GeminiError::RateLimited {
                message: format!(
                    "maximum retry attempts ({}) exceeded",
                    self.config.max_retries
                ),
            },
        })
    }

    async fn generate_content_once(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        debug!(model = %self.config.model, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::from_reqwest_error(e, self.config.timeout))?;

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: Response,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let status = response.status();

        if status.is_success() {
            let response_text = response
                .text()
                .await
                .map_err(|e| GeminiError::from_reqwest_error(e, self.config.timeout))?;

            let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
                .map_err(|e| GeminiError::Parse {
                    message: format!("Failed to parse response: {e}"),
                })?;

            if let Some(reason) = parsed.block_reason() {
                warn!(reason, "Prompt blocked by safety filters");
                return Err(GeminiError::Blocked {
                    reason: reason.to_string(),
                });
            }

            parsed
                .validate()
                .map_err(|e| GeminiError::InvalidResponse { message: e })?;

            Ok(parsed)
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response".to_string());

            Err(GeminiError::from_status_and_body(status, &error_body))
        }
    }

    /// The full contract: send a prompt with the default generation and
    /// safety configuration, retrying on rate limits. Any failure is logged
    /// and collapses to `None`.
    pub async fn generate(&self, prompt: &str) -> Option<String> {
        let request = GenerateContentRequest::new(prompt.to_string());

        match self.generate_content(request).await {
            Ok(response) => match response.extract_text() {
                Some(text) => Some(text),
                None => {
                    error!("No text content in response");
                    None
                }
            },
            Err(GeminiError::Blocked { reason }) => {
                warn!(%reason, "Generation blocked");
                None
            }
            Err(error) => {
                error!(%error, "Generation failed");
                None
            }
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}
