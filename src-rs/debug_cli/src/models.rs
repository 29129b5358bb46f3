use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub base_url: String,
    pub owner_id: Option<String>,
    pub variables: Map<String, Value>,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct CalculateRequest {
    pub image: String,
    pub dict_of_vars: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct ResultEntry {
    pub expr: String,
    pub result: Value,
    pub assign: bool,
}

#[derive(Debug, Deserialize)]
pub struct DrawingInfo {
    pub id: String,
    pub file_id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}
