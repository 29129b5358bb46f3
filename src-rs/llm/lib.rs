pub mod gemini_adapter;
pub mod rotation;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use gemini_adapter::{GeminiAdapter, GeminiConfig, GEMINI_ALLOWED_MODELS};
pub use rotation::Rotator;
pub use types::{CompletionRequest, LLMResponse, Message, Part, ProviderAdapter, ProviderError};
