use async_trait::async_trait;
use serde_json::{json, Map};
use tracing::info;

use crate::model::{ModelError, ModelResponse, ResponseProducer};

const PLACEHOLDER_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/4/47/PNG_transparency_example.png";
const IMAGE_SOURCE_LABEL: &str = "DALL-E-like model";
const TEXT_SOURCE_LABEL: &str = "LLM-like model";
const INTERNAL_ERROR_MESSAGE: &str =
    "Model failed to process the request due to internal server error.";

/// Local deterministic stand-in for a hosted model, so the demo runs without
/// network access. Routing is a plain substring sniff on the prompt:
/// "image" returns a canned image reply, "error" fails, anything else echoes
/// the prompt back as a canned text reply.
pub struct SimulatedModel;

impl SimulatedModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResponseProducer for SimulatedModel {
    async fn produce(&self, prompt: &str) -> Result<ModelResponse, ModelError> {
        info!("AI Model called with prompt: '{}'", prompt);

        let lowered = prompt.to_lowercase();

        if lowered.contains("image") {
            let mut metadata = Map::new();
            metadata.insert("source".to_string(), json!(IMAGE_SOURCE_LABEL));
            return Ok(ModelResponse::image(PLACEHOLDER_IMAGE_URL, metadata));
        }

        if lowered.contains("error") {
            return Err(ModelError::new(INTERNAL_ERROR_MESSAGE));
        }

        let mut metadata = Map::new();
        metadata.insert("source".to_string(), json!(TEXT_SOURCE_LABEL));
        Ok(ModelResponse::text(
            format!(
                "Результат від моделі для запиту: '{}'. Мої вітання, це стандартна текстова відповідь.",
                prompt
            ),
            metadata,
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::ResponseKind;

    #[tokio::test]
    async fn image_prompts_return_the_placeholder_image() {
        let model = SimulatedModel::new();

        let response = model.produce("draw me an image of a cat").await.unwrap();

        assert_eq!(response.kind, ResponseKind::Image);
        assert_eq!(response.content, PLACEHOLDER_IMAGE_URL);
        assert_eq!(response.metadata.get("source"), Some(&json!(IMAGE_SOURCE_LABEL)));
    }

    #[tokio::test]
    async fn image_routing_is_case_insensitive() {
        let model = SimulatedModel::new();

        let response = model.produce("An IMAGE, please").await.unwrap();

        assert_eq!(response.kind, ResponseKind::Image);
        assert!(!response.content.is_empty());
    }

    #[tokio::test]
    async fn error_prompts_fail_with_the_internal_error_message() {
        let model = SimulatedModel::new();

        let err = model.produce("trigger an error please").await.unwrap_err();
        assert_eq!(err.to_string(), INTERNAL_ERROR_MESSAGE);

        let err = model.produce("ERROR").await.unwrap_err();
        assert_eq!(err.to_string(), INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn other_prompts_echo_the_prompt_in_a_text_reply() {
        let model = SimulatedModel::new();

        let response = model.produce("hello").await.unwrap();

        assert_eq!(response.kind, ResponseKind::Text);
        assert!(response.content.contains("hello"));
        assert!(response
            .content
            .starts_with("Результат від моделі для запиту: 'hello'."));
        assert_eq!(response.metadata.get("source"), Some(&json!(TEXT_SOURCE_LABEL)));
    }

    #[tokio::test]
    async fn image_routing_wins_over_error_routing() {
        let model = SimulatedModel::new();

        let response = model.produce("an image of an error page").await.unwrap();

        assert_eq!(response.kind, ResponseKind::Image);
    }
}
