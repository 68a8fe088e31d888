pub mod client;
pub mod errors;
pub mod models;
pub mod retry;

pub use client::{GeminiClient, GeminiConfig};
pub use errors::{GeminiError, RetryError};
pub use models::{
    Candidate, Content, GeminiModel, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, ListModelsResponse, Part, PromptFeedback, SafetyRating, SafetySetting,
    UsageMetadata,
};
pub use retry::{backoff_delay, parse_retry_delay, with_retry, RetryConfig};
