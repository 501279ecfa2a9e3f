use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// The single error kind surfaced to the user. Every upstream failure
/// (simulated internal error, network, auth, malformed response) collapses
/// into this type so callers never have to distinguish failure causes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ModelError {
    message: String,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Tag of a model response. Unknown tags keep their original string so the
/// fallback renderer can show the record as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Text,
    Image,
    #[serde(untagged)]
    Other(String),
}

impl ResponseKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResponseKind::Text => "text",
            ResponseKind::Image => "image",
            ResponseKind::Other(tag) => tag,
        }
    }
}

/// Structured reply from a model call. Immutable once constructed; owned by
/// the conversation entry that records it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ModelResponse {
    pub fn text(content: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            kind: ResponseKind::Text,
            content: content.into(),
            metadata,
        }
    }

    pub fn image(url: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            kind: ResponseKind::Image,
            content: url.into(),
            metadata,
        }
    }
}

/// Seam between the interaction loop and the configured model backend.
/// Exactly one implementation is selected at startup.
#[async_trait]
pub trait ResponseProducer {
    async fn produce(&self, prompt: &str) -> Result<ModelResponse, ModelError>;
}

/// Which backend answers prompts for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelMode {
    Simulated,
    Live,
}

impl ModelMode {
    pub fn label(&self) -> &'static str {
        match self {
            ModelMode::Simulated => "sim",
            ModelMode::Live => "live",
        }
    }
}
