use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, error, info};

use super::normalize::normalize_response;
use super::prompt::render_prompt;
use super::types::{AnalysisRequest, AnalysisResult};
use crate::error::AnalyzeError;
use crate::llm::{CompletionRequest, Message, Part, ProviderAdapter};

const IMAGE_MIME: &str = "image/png";

static DATA_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/\w+;base64,").unwrap());

/// Sends a drawing to the vision model and normalizes what comes back.
pub struct ImageAnalyzer {
    client: Arc<dyn ProviderAdapter>,
    model: String,
    temperature: f64,
}

impl ImageAnalyzer {
    pub fn new(client: Arc<dyn ProviderAdapter>, model: &str, temperature: f64) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
        }
    }

    /// One model call per request. Provider failures are returned as-is and
    /// not retried; a reply that cannot be parsed is not an error.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        let image = strip_data_url_prefix(&request.image);
        let prompt = render_prompt(&request.variables);
        let completion = CompletionRequest {
            messages: vec![Message::user(vec![
                Part::text(prompt),
                Part::inline_data(IMAGE_MIME, image),
            ])],
            temperature: Some(self.temperature),
            model: Some(self.model.clone()),
        };

        info!(
            model = %self.model,
            image_bytes = image.len(),
            variables = request.variables.len(),
            "analyzing drawing"
        );
        let response = self.client.complete(completion).map_err(|err| {
            error!(code = %err.code, "vision model call failed: {}", err.message);
            AnalyzeError::Provider(err)
        })?;
        debug!(reply = %response.content, "vision model reply");

        let result = normalize_response(&response.content);
        info!(entries = result.len(), "analysis complete");
        Ok(result)
    }
}

pub fn strip_data_url_prefix(image: &str) -> &str {
    match DATA_URL_PREFIX.find(image) {
        Some(prefix) => &image[prefix.end()..],
        None => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedProvider;
    use serde_json::{json, Map};

    fn request(image: &str) -> AnalysisRequest {
        let mut variables = Map::new();
        variables.insert("y".to_string(), json!(7));
        AnalysisRequest {
            image: image.to_string(),
            variables,
        }
    }

    #[test]
    fn strips_only_a_leading_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,BBBB"), "BBBB");
        assert_eq!(strip_data_url_prefix("AAAA"), "AAAA");
        assert_eq!(
            strip_data_url_prefix("xdata:image/png;base64,AAAA"),
            "xdata:image/png;base64,AAAA"
        );
    }

    #[test]
    fn sends_prompt_and_bare_image_once() {
        let provider = Arc::new(ScriptedProvider::replying(
            r#"[{"expr":"y + 1","result":8}]"#,
        ));
        let analyzer = ImageAnalyzer::new(provider.clone(), "gemini-1.5-flash", 0.3);

        let result = analyzer.analyze(&request("data:image/png;base64,QUJD")).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].expression, "y + 1");
        assert!(!result[0].is_assignment);

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let sent = &requests[0];
        assert_eq!(sent.model.as_deref(), Some("gemini-1.5-flash"));
        assert_eq!(sent.temperature, Some(0.3));
        let parts = &sent.messages[0].parts;
        match &parts[0] {
            Part::Text(text) => assert!(text.contains(r#"{"y":7}"#)),
            other => panic!("expected text part, got {:?}", other),
        }
        assert_eq!(parts[1], Part::inline_data("image/png", "QUJD"));
    }

    #[test]
    fn provider_failure_is_reported_without_retry() {
        let provider = Arc::new(ScriptedProvider::failing("rate_limit", "quota exceeded"));
        let analyzer = ImageAnalyzer::new(provider.clone(), "gemini-1.5-flash", 0.3);

        let err = analyzer.analyze(&request("QUJD")).unwrap_err();
        match err {
            AnalyzeError::Provider(inner) => assert_eq!(inner.code, "rate_limit"),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn prose_reply_becomes_single_entry() {
        let provider = Arc::new(ScriptedProvider::replying("I think this is a cat."));
        let analyzer = ImageAnalyzer::new(provider, "gemini-1.5-flash", 0.3);

        let result = analyzer.analyze(&request("QUJD")).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].expression, "I think this is a cat.");
    }
}
