use anyhow::Context;
use tracing::warn;

use mizuyari::services::gemini::{GeminiClient, GeminiConfig};
use mizuyari::services::watering::{WateringAdvisor, PAUSE_BETWEEN_PLANTS, TEST_PLANTS};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (ignore errors if missing)
    dotenvy::dotenv().ok();

    mizuyari::logging::init_from_env()?;

    let config = GeminiConfig::from_env().context("Gemini API configuration")?;
    let client = GeminiClient::new(config)?;

    let models = client
        .ensure_model_available()
        .await
        .context("model initialization")?;

    println!("Available models:");
    for model in models.iter().filter(|m| m.is_gemini()) {
        println!("- {}", model.short_name());
    }

    let advisor = WateringAdvisor::new(client);

    for plant in TEST_PLANTS {
        let advice = tokio::select! {
            advice = advisor.advice_for(plant) => advice,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, stopping");
                break;
            }
        };

        if let Some(advice) = advice {
            println!("\n=== Watering guide: {plant} ===");
            println!("{advice}");
            println!("{}\n", "=".repeat(80));
        }

        tokio::select! {
            _ = tokio::time::sleep(PAUSE_BETWEEN_PLANTS) => {}
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, stopping");
                break;
            }
        }
    }

    Ok(())
}
