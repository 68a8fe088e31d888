pub mod gemini;
pub mod watering;

pub use gemini::{GeminiClient, GeminiConfig, GeminiError, RetryConfig, RetryError};
pub use watering::{WateringAdvisor, PAUSE_BETWEEN_PLANTS, TEST_PLANTS};
