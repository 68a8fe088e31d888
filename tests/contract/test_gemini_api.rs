use std::time::Duration;

use mizuyari::services::gemini::{
    Content, GeminiClient, GeminiConfig, GeminiError, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, Part,
};

#[test]
fn test_generate_content_request_structure() {
    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::Text {
                text: "How often should an aloe be watered in winter?".to_string(),
            }],
            role: Some("user".to_string()),
        }],
        generation_config: Some(GenerationConfig {
            temperature: Some(0.7),
            max_output_tokens: Some(2048),
            top_p: Some(0.8),
            top_k: Some(40),
            candidate_count: None,
            stop_sequences: None,
        }),
        safety_settings: None,
    };

    assert_eq!(request.contents.len(), 1);
    assert_eq!(request.contents[0].parts.len(), 1);
    assert!(request.generation_config.is_some());

    // The wire format is camelCase.
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
    assert!(value["generationConfig"]["topP"].is_number());
    assert!(value.get("safetySettings").is_none());
}

#[test]
fn test_default_request_carries_safety_settings() {
    let request = GenerateContentRequest::new("Hello".to_string());

    let settings = request.safety_settings.as_ref().unwrap();
    assert_eq!(settings.len(), 4);

    let categories: Vec<&str> = settings.iter().map(|s| s.category.as_str()).collect();
    for category in [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ] {
        assert!(categories.contains(&category), "missing {category}");
    }
    assert!(settings
        .iter()
        .all(|s| s.threshold == "BLOCK_MEDIUM_AND_ABOVE"));
}

#[test]
fn test_response_structure_round_trips() {
    let raw = r#"{
        "candidates": [{
            "content": { "parts": [{ "text": "Water sparingly." }], "role": "model" },
            "finishReason": "STOP",
            "safetyRatings": [
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "probability": "NEGLIGIBLE" }
            ]
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 4,
            "totalTokenCount": 16
        }
    }"#;

    let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();

    assert_eq!(response.extract_text().as_deref(), Some("Water sparingly."));
    assert_eq!(response.block_reason(), None);
    assert_eq!(response.get_token_usage(), Some(16));
}

#[test]
fn test_blocked_response_structure() {
    let raw = r#"{
        "promptFeedback": { "blockReason": "SAFETY" }
    }"#;

    let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();

    assert_eq!(response.block_reason(), Some("SAFETY"));
    assert!(response.extract_text().is_none());
}

#[test]
fn test_error_mapping_by_status() {
    let rate_limited = GeminiError::from_status_and_body(
        reqwest::StatusCode::TOO_MANY_REQUESTS,
        r#"{"error": {"code": 429, "message": "Quota exceeded. retry_delay { seconds: 17 }", "status": "RESOURCE_EXHAUSTED"}}"#,
    );
    assert!(rate_limited.is_retryable());
    assert!(rate_limited.to_string().contains("seconds: 17"));

    let bad_request = GeminiError::from_status_and_body(
        reqwest::StatusCode::BAD_REQUEST,
        r#"{"error": {"code": 400, "message": "Invalid argument", "status": "INVALID_ARGUMENT"}}"#,
    );
    assert!(!bad_request.is_retryable());
    assert!(bad_request.to_string().contains("Invalid argument"));

    let server_error =
        GeminiError::from_status_and_body(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "oops");
    assert!(!server_error.is_retryable());
}

#[test]
fn test_client_requires_api_key() {
    let config = GeminiConfig {
        api_key: String::new(),
        base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        model: "gemini-2.0-flash".to_string(),
        timeout: Duration::from_secs(120),
        max_retries: 3,
        base_delay: Duration::from_secs(120),
    };

    match GeminiClient::new(config) {
        Err(error) => assert!(error.is_configuration_error()),
        Ok(_) => panic!("client creation should fail without an API key"),
    }
}

#[test]
fn test_client_accepts_valid_config() {
    let config = GeminiConfig::new("test_api_key".to_string())
        .with_model("gemini-2.0-flash".to_string())
        .with_max_retries(3);

    let client = GeminiClient::new(config).unwrap();
    assert_eq!(client.config().model, "gemini-2.0-flash");
    assert_eq!(client.config().max_retries, 3);
}
