use std::sync::Mutex;

use super::types::{CompletionRequest, LLMResponse, ProviderAdapter, ProviderError};

/// Provider double that replays one scripted outcome and records every
/// request it receives.
pub(crate) struct ScriptedProvider {
    outcome: Result<String, ProviderError>,
    pub(crate) requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn replying(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(code: &str, message: &str) -> Self {
        Self {
            outcome: Err(ProviderError::new(code, message, true)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().map(|list| list.len()).unwrap_or(0)
    }
}

impl ProviderAdapter for ScriptedProvider {
    fn complete(&self, request: CompletionRequest) -> Result<LLMResponse, ProviderError> {
        if let Ok(mut list) = self.requests.lock() {
            list.push(request);
        }
        self.outcome.clone().map(|content| LLMResponse { content })
    }
}
