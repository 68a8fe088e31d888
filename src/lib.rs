pub mod env;
pub mod logging;
pub mod services;

pub use logging::{init_logging, LoggingConfig};
pub use services::gemini::{GeminiClient, GeminiConfig, GeminiError};
pub use services::watering::WateringAdvisor;
