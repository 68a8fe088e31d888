use std::time::Duration;
use tracing::info;

use super::gemini::GeminiClient;

/// Plants the binary asks about, in order.
pub const TEST_PLANTS: &[&str] = &["Echeveria", "Cactus", "Aloe"];

/// Courtesy pause between plants to stay under the request quota.
pub const PAUSE_BETWEEN_PLANTS: Duration = Duration::from_secs(2);

/// Prompt asking for seasonal watering guidance in a fixed output format.
pub fn watering_prompt(plant_name: &str) -> String {
    format!(
        "You are a plant care expert. Answer using the format below.\n\
         \n\
         Explain concretely, season by season, how often {plant_name} should be watered.\n\
         If it depends on the variety or growing environment, give the general guideline.\n\
         \n\
         Output format:\n\
         - Spring/summer watering: [frequency, soil condition, timing]\n\
         - Autumn watering: [frequency, soil condition, timing]\n\
         - Winter watering: [frequency, soil condition, timing]\n\
         - Cautions: [the main points to watch out for]\n"
    )
}

pub struct WateringAdvisor {
    client: GeminiClient,
}

impl WateringAdvisor {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Watering advice for one plant, or `None` when the call failed or was
    /// blocked (already reported by the client).
    pub async fn advice_for(&self, plant_name: &str) -> Option<String> {
        let prompt = watering_prompt(plant_name);
        let advice = self.client.generate(&prompt).await?;

        info!(
            plant = plant_name,
            chars = advice.len(),
            "Received watering advice"
        );
        Some(advice)
    }
}
