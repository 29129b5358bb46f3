use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::rotation::Rotator;
use super::types::{CompletionRequest, LLMResponse, Message, Part, ProviderAdapter, ProviderError};

pub const GEMINI_ALLOWED_MODELS: [&str; 4] = [
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-2.0-flash",
    "gemini-2.5-flash",
];
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub struct GeminiConfig {
    pub api_keys: Vec<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub timeout: Duration,
}

pub struct GeminiAdapter {
    cfg: GeminiConfig,
    rotator: Rotator,
    client: Client,
}

impl GeminiAdapter {
    pub fn new(mut cfg: GeminiConfig) -> Result<Self, ProviderError> {
        if cfg.base_url.is_empty() {
            cfg.base_url = DEFAULT_BASE_URL.to_string();
        }
        if cfg.model.is_empty() {
            cfg.model = DEFAULT_MODEL.to_string();
        }
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|err| ProviderError::new("client_error", &err.to_string(), false))?;
        Ok(Self {
            rotator: Rotator::new(cfg.api_keys.clone()),
            cfg,
            client,
        })
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn complete(&self, request: CompletionRequest) -> Result<LLMResponse, ProviderError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.cfg.model.clone());
        if !GEMINI_ALLOWED_MODELS.iter().any(|m| *m == model) {
            return Err(ProviderError::new(
                "invalid_model",
                &format!("model not allowed: {}", model),
                false,
            ));
        }
        let key = self
            .rotator
            .next()
            .ok_or_else(|| ProviderError::new("auth_error", "no Gemini API keys", false))?;
        let temperature = request.temperature.unwrap_or(self.cfg.temperature);
        let payload = build_payload(&request.messages, temperature);

        debug!(model = %model, keys = self.rotator.len(), "sending generateContent request");
        send_request(&self.client, &self.cfg.base_url, &model, key, &payload)
    }
}

fn part_to_json(part: &Part) -> Value {
    match part {
        Part::Text(text) => json!({ "text": text }),
        Part::InlineData { mime_type, data } => json!({
            "inlineData": {
                "mimeType": mime_type,
                "data": data,
            }
        }),
    }
}

fn build_payload(messages: &[Message], temperature: f64) -> Value {
    let contents: Vec<Value> = messages
        .iter()
        .map(|msg| {
            let role = if msg.role == "user" { "user" } else { "model" };
            let parts: Vec<Value> = msg.parts.iter().map(part_to_json).collect();
            json!({
                "role": role,
                "parts": parts,
            })
        })
        .collect();

    json!({
        "contents": contents,
        "generationConfig": {
            "temperature": temperature
        }
    })
}

fn send_request(
    client: &Client,
    base_url: &str,
    model: &str,
    api_key: &str,
    payload: &Value,
) -> Result<LLMResponse, ProviderError> {
    let endpoint = format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    );
    let resp = client
        .post(endpoint)
        .header("Content-Type", "application/json")
        .header("x-goog-api-key", api_key)
        .json(payload)
        .send()
        .map_err(|err| ProviderError::new("network_error", &err.to_string(), true))?;

    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    if status.is_client_error() || status.is_server_error() {
        warn!(status = status.as_u16(), "gemini returned an error status");
        return Err(classify_error(status.as_u16(), &body));
    }

    let raw: Value = serde_json::from_str(&body)
        .map_err(|_| ProviderError::new("parse_error", "invalid json", false))?;
    let content = parse_response(&raw)?;
    Ok(LLMResponse { content })
}

fn classify_error(status: u16, body: &str) -> ProviderError {
    let lowered = body.to_lowercase();
    if status == 401 || status == 403 {
        return ProviderError::new("auth_error", body, false);
    }
    if status == 429 || lowered.contains("quota") || lowered.contains("resource_exhausted") {
        return ProviderError::new("rate_limit", body, true);
    }
    if status >= 500 {
        return ProviderError::new("server_error", body, true);
    }
    ProviderError::new("api_error", body, false)
}

/// Concatenated text of the first candidate. A reply without candidates
/// (typically a blocked prompt) is an error.
fn parse_response(raw: &Value) -> Result<String, ProviderError> {
    let first = match raw
        .get("candidates")
        .and_then(|v| v.as_array())
        .and_then(|list| list.first())
    {
        Some(value) => value,
        None => {
            let reason = raw
                .pointer("/promptFeedback/blockReason")
                .and_then(|v| v.as_str())
                .unwrap_or("no candidates");
            return Err(ProviderError::new("empty_response", reason, false));
        }
    };

    let mut text = String::new();
    let parts = first
        .pointer("/content/parts")
        .and_then(|v| v.as_array())
        .map(|parts| parts.as_slice())
        .unwrap_or_default();
    for part in parts {
        if let Some(chunk) = part.get("text").and_then(|v| v.as_str()) {
            text.push_str(chunk);
        }
    }
    Ok(text)
}
