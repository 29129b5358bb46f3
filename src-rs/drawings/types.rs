use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a saved drawing. The image itself lives in object storage
/// and is referenced by `file_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub id: String,
    pub owner_id: String,
    pub file_id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewDrawing {
    pub owner_id: String,
    pub file_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}
