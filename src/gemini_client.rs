use std::env;

use async_trait::async_trait;
use eyre::{eyre, Result};
use serde_json::{json, Map, Value};
use tracing::{debug, error};
use url::Url;

use crate::model::{ModelError, ModelResponse, ResponseProducer};

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";
const GEMINI_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiClient {
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// The API key is read once at construction; a missing key is a startup
    /// failure, never a per-request one.
    pub fn new() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| eyre!("GEMINI_API_KEY environment variable not set"))?;

        let client = reqwest::Client::new();

        Ok(Self { api_key, client })
    }

    async fn generate_content(&self, prompt: &str) -> Result<Value, ModelError> {
        let api_url = Url::parse_with_params(GEMINI_ENDPOINT, &[("key", self.api_key.as_str())])
            .map_err(|e| ModelError::new(format!("Invalid Gemini API endpoint: {}", e)))?;

        // The prompt travels as a single user message.
        let request_body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        {
                            "text": prompt
                        }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": 0.2,
                "topP": 0.8,
                "topK": 40,
                "maxOutputTokens": 8192
            }
        });

        debug!("Sending request to Gemini API: {}", request_body);

        let response = self
            .client
            .post(api_url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ModelError::new(format!("Request to Gemini API failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            error!("API request failed with response: {}", error_text);
            return Err(ModelError::new(format!("API request failed: {}", error_text)));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| ModelError::new(format!("Failed to decode Gemini API response: {}", e)))?;

        debug!("Received response from Gemini API: {}", response_json);

        Ok(response_json)
    }
}

#[async_trait]
impl ResponseProducer for GeminiClient {
    async fn produce(&self, prompt: &str) -> Result<ModelResponse, ModelError> {
        let response_json = self.generate_content(prompt).await?;
        let outcome = extract_outcome(&response_json)?;

        let mut metadata = Map::new();
        metadata.insert("model".to_string(), json!(outcome.model));
        metadata.insert("tokens".to_string(), json!(outcome.tokens));

        Ok(ModelResponse::text(outcome.text, metadata))
    }
}

#[derive(Debug)]
struct GenerationOutcome {
    text: String,
    model: String,
    tokens: u64,
}

/// Pulls the generated text and reported usage out of a `generateContent`
/// reply. Only the first candidate is consulted; its text parts are
/// concatenated in order.
fn extract_outcome(response: &Value) -> Result<GenerationOutcome, ModelError> {
    let parts = response
        .get("candidates")
        .and_then(|candidates| candidates.as_array())
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .ok_or_else(|| ModelError::new("Gemini API response contained no candidates"))?;

    let mut text = String::new();
    for part in parts {
        if let Some(fragment) = part.get("text").and_then(|t| t.as_str()) {
            text.push_str(fragment);
        }
    }

    if text.is_empty() {
        return Err(ModelError::new("Gemini API response contained no text parts"));
    }

    let model = response
        .get("modelVersion")
        .and_then(|m| m.as_str())
        .unwrap_or(GEMINI_MODEL)
        .to_string();

    let tokens = response
        .get("usageMetadata")
        .and_then(|usage| usage.get("totalTokenCount"))
        .and_then(|count| count.as_u64())
        .unwrap_or(0);

    Ok(GenerationOutcome { text, model, tokens })
}
