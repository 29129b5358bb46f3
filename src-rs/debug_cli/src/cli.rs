use std::env;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::models::CLIConfig;

const DEFAULT_URL: &str = "http://localhost:4000";

pub fn parse_config() -> CLIConfig {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args(&args, env_opt("DRAWALYZE_URL"))
}

fn parse_args(args: &[String], env_url: Option<String>) -> CLIConfig {
    let mut cfg = CLIConfig {
        base_url: env_url.unwrap_or_else(|| DEFAULT_URL.to_string()),
        owner_id: env_opt("DRAWALYZE_OWNER"),
        variables: Map::new(),
        image: None,
    };

    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--base" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.base_url = value.clone();
                    idx += 1;
                }
            }
            "--owner" => {
                if let Some(value) = args.get(idx + 1) {
                    cfg.owner_id = Some(value.clone());
                    idx += 1;
                }
            }
            "--var" => {
                if let Some((name, value)) = args.get(idx + 1).and_then(|raw| parse_assignment(raw))
                {
                    cfg.variables.insert(name, value);
                    idx += 1;
                }
            }
            other if !other.starts_with("--") && cfg.image.is_none() => {
                cfg.image = Some(PathBuf::from(other));
            }
            _ => {}
        }
        idx += 1;
    }

    cfg
}

/// `name=value`; the value is read as JSON when it parses, else as a string.
pub fn parse_assignment(raw: &str) -> Option<(String, Value)> {
    let (name, value) = raw.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let value = value.trim();
    let parsed = serde_json::from_str::<Value>(value)
        .unwrap_or_else(|_| Value::String(value.to_string()));
    Some((name.to_string(), parsed))
}

fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
