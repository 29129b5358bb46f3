use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use serde_json::{Map, Value};

use crate::models::{CalculateRequest, DrawingInfo, ResultEntry};

pub struct HTTPClient {
    pub base_url: String,
    client: Client,
}

impl HTTPClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(90))
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    pub fn calculate(
        &self,
        image: &Path,
        variables: &Map<String, Value>,
    ) -> Result<Vec<ResultEntry>, String> {
        let req = CalculateRequest {
            image: encode_image(image)?,
            dict_of_vars: variables.clone(),
        };
        let url = format!("{}/calculate", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(url)
            .json(&req)
            .send()
            .map_err(|err| err.to_string())?;

        if resp.status().is_success() {
            resp.json::<Vec<ResultEntry>>().map_err(|err| err.to_string())
        } else {
            Err(error_text(resp))
        }
    }

    pub fn list_drawings(&self, owner_id: &str, limit: usize) -> Result<Vec<DrawingInfo>, String> {
        let url = format!("{}/drawings", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .get(url)
            .query(&[("owner_id", owner_id.to_string()), ("limit", limit.to_string())])
            .send()
            .map_err(|err| err.to_string())?;
        if resp.status().is_success() {
            let value = resp.json::<Value>().map_err(|err| err.to_string())?;
            let drawings = value
                .get("drawings")
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();
            Ok(drawings
                .into_iter()
                .filter_map(|item| serde_json::from_value::<DrawingInfo>(item).ok())
                .collect())
        } else {
            Err(error_text(resp))
        }
    }
}

/// Reads an image file into the data-URL form a browser canvas produces.
pub fn encode_image(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|err| format!("{}: {}", path.display(), err))?;
    let mime = match path.extension().and_then(|ext| ext.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    };
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn error_text(resp: reqwest::blocking::Response) -> String {
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(body);
    format!("http {}: {}", status.as_u16(), message)
}
