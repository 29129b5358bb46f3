use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use crate::analysis::{validate_request, AnalysisResult, ImageAnalyzer};
use crate::drawings::{DrawingRecord, DrawingStore, NewDrawing};
use crate::error::AnalyzeError;

const DEFAULT_DRAWINGS_LIMIT: usize = 25;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ImageAnalyzer>,
    pub drawings: Arc<dyn DrawingStore>,
}

impl AppState {
    pub fn new(analyzer: ImageAnalyzer, drawings: Arc<dyn DrawingStore>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            drawings,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct DrawingsQuery {
    pub owner_id: Option<String>,
    pub limit: Option<usize>,
}

pub async fn handle_root() -> Json<Value> {
    Json(json!({"message": "Server is running"}))
}

pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

pub async fn handle_calculate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(body) = body?;
    let request = validate_request(&body)?;

    // The vision client blocks on its HTTP call.
    let analyzer = state.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&request))
        .await
        .map_err(|err| AnalyzeError::Worker(err.to_string()))??;

    Ok(Json(result))
}

pub async fn handle_save_drawing(
    State(state): State<AppState>,
    body: Result<Json<NewDrawing>, JsonRejection>,
) -> Result<Json<DrawingRecord>, ApiError> {
    let Json(drawing) = body?;
    let record = state.drawings.save(drawing)?;
    Ok(Json(record))
}

pub async fn handle_list_drawings(
    State(state): State<AppState>,
    query: Result<Query<DrawingsQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let owner_id = query
        .owner_id
        .filter(|owner| !owner.trim().is_empty())
        .ok_or(ApiError::MissingParam("owner_id"))?;
    let limit = query.limit.unwrap_or(DEFAULT_DRAWINGS_LIMIT);
    let drawings = state.drawings.list_by_owner(&owner_id, limit)?;
    Ok(Json(json!({ "drawings": drawings })))
}
