use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AnalyzerConfig;
use crate::error::ConfigError;
use crate::llm::{GeminiAdapter, GeminiConfig, ProviderAdapter};

/// Collects keys from `primary` (comma separated) and `{prefix}_2` through
/// `{prefix}_10`.
fn load_keys<F>(lookup: F, primary: &str, prefix: &str) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut keys = Vec::new();
    if let Some(raw) = lookup(primary) {
        keys.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string),
        );
    }
    for idx in 2..=10 {
        if let Some(value) = lookup(&format!("{}_{}", prefix, idx)) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                keys.push(trimmed.to_string());
            }
        }
    }
    keys
}

pub fn load_gemini_keys() -> Vec<String> {
    load_keys(|key| env::var(key).ok(), "GEMINI_API_KEY", "GEMINI_API_KEY")
}

pub fn build_vision_client(
    cfg: &AnalyzerConfig,
    api_keys: Vec<String>,
) -> Result<Arc<dyn ProviderAdapter>, ConfigError> {
    if api_keys.is_empty() {
        return Err(ConfigError::MissingApiKey);
    }
    let adapter = GeminiAdapter::new(GeminiConfig {
        api_keys,
        base_url: cfg.base_url.clone(),
        model: cfg.model.clone(),
        temperature: cfg.temperature,
        timeout: Duration::from_secs(cfg.timeout_secs),
    })
    .map_err(ConfigError::Client)?;
    Ok(Arc::new(adapter))
}
