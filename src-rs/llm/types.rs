use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One piece of a message: either prompt text or an inlined binary blob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: String },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn inline_data(mime_type: &str, data: impl Into<String>) -> Self {
        Part::InlineData {
            mime_type: mime_type.to_string(),
            data: data.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Message {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: "user".to_string(),
            parts,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub temperature: Option<f64>,
    pub model: Option<String>,
}

/// Failure reported by a provider. `retryable` only classifies the failure;
/// callers in this crate never retry.
#[derive(Clone, Debug, Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl ProviderError {
    pub fn new(code: &str, message: &str, retryable: bool) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            retryable,
        }
    }
}

pub trait ProviderAdapter: Send + Sync {
    fn complete(&self, request: CompletionRequest) -> Result<LLMResponse, ProviderError>;
}
