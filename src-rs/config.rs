use std::env;
use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::ConfigError;
use crate::llm::gemini_adapter::{DEFAULT_BASE_URL, DEFAULT_MODEL, GEMINI_ALLOWED_MODELS};

pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

/// Server and model settings. API keys are loaded separately so this struct
/// can be logged.
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f64,
    pub timeout_secs: u64,
    pub body_limit_bytes: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            env: "dev".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.3,
            timeout_secs: 60,
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; unset or blank keys keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut cfg = Self::default();

        if let Some(host) = get("HOST") {
            cfg.host = host;
        }
        if let Some(port) = get("PORT") {
            cfg.port = parse_value("PORT", &port)?;
        }
        if let Some(env) = get("APP_ENV") {
            cfg.env = env;
        }
        if let Some(model) = get("GEMINI_MODEL") {
            if !GEMINI_ALLOWED_MODELS.contains(&model.as_str()) {
                return Err(ConfigError::ModelNotAllowed(model));
            }
            cfg.model = model;
        }
        if let Some(base_url) = get("GEMINI_BASE_URL") {
            cfg.base_url = base_url;
        }
        if let Some(temperature) = get("GEMINI_TEMPERATURE") {
            cfg.temperature = parse_value("GEMINI_TEMPERATURE", &temperature)?;
        }
        if let Some(timeout) = get("GEMINI_TIMEOUT_SECS") {
            cfg.timeout_secs = parse_value("GEMINI_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(limit) = get("BODY_LIMIT_BYTES") {
            cfg.body_limit_bytes = parse_value("BODY_LIMIT_BYTES", &limit)?;
        }

        Ok(cfg)
    }

    /// `HOST` may be an IP literal or a resolvable name such as `localhost`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: "HOST",
            value: self.host.clone(),
        };
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|_| invalid())?
            .next()
            .ok_or_else(invalid)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AnalyzerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.body_limit_bytes, DEFAULT_BODY_LIMIT);
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn reads_overrides() {
        let cfg = AnalyzerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8088"),
            ("APP_ENV", "production"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_TEMPERATURE", "0.1"),
            ("GEMINI_TIMEOUT_SECS", " "),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "127.0.0.1:8088");
        assert_eq!(cfg.env, "production");
        assert_eq!(cfg.model, "gemini-2.0-flash");
        assert_eq!(cfg.temperature, 0.1);
        assert_eq!(cfg.timeout_secs, 60);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AnalyzerConfig::from_lookup(lookup(&[("PORT", "http")])),
            Err(ConfigError::InvalidValue { key: "PORT", .. })
        ));
        assert!(matches!(
            AnalyzerConfig::from_lookup(lookup(&[("GEMINI_MODEL", "gpt-4o")])),
            Err(ConfigError::ModelNotAllowed(_))
        ));
        let cfg = AnalyzerConfig::from_lookup(lookup(&[("HOST", "not a host")])).unwrap();
        assert!(cfg.bind_addr().is_err());
    }

    #[test]
    fn host_names_are_resolved() {
        let cfg = AnalyzerConfig::from_lookup(lookup(&[("HOST", "localhost"), ("PORT", "4100")]))
            .unwrap();
        let addr = cfg.bind_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 4100);
    }
}
