use thiserror::Error;

use crate::llm::ProviderError;

/// Inbound request body did not have the expected shape.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &str, reason: &str) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("vision model call failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("analysis worker failed: {0}")]
    Worker(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{field} is required")]
    Invalid { field: &'static str },
    #[error("drawing store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no Gemini API key found (set GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("model not allowed: {0}")]
    ModelNotAllowed(String),
    #[error("failed to build vision client: {0}")]
    Client(#[source] ProviderError),
}
