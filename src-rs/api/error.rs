use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::error::{AnalyzeError, StoreError, ValidationError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Extractor rejection; keeps the framework's status (400, 413, 415, ...).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("{0} is required")]
    MissingParam(&'static str),
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Store(StoreError::Invalid { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Analyze(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

/// Client errors echo their message; server errors are logged and replaced
/// with a generic one.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            warn!(error = %self, "rejected request");
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
