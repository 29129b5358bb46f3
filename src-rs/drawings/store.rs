use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use super::types::{DrawingRecord, NewDrawing};
use crate::error::StoreError;

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Document store for drawing metadata.
pub trait DrawingStore: Send + Sync {
    fn save(&self, drawing: NewDrawing) -> Result<DrawingRecord, StoreError>;

    /// Newest first, at most `limit` records.
    fn list_by_owner(&self, owner_id: &str, limit: usize) -> Result<Vec<DrawingRecord>, StoreError>;
}

pub struct MemoryDrawingStore {
    records: RwLock<Vec<DrawingRecord>>,
}

impl MemoryDrawingStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryDrawingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingStore for MemoryDrawingStore {
    fn save(&self, drawing: NewDrawing) -> Result<DrawingRecord, StoreError> {
        if drawing.owner_id.trim().is_empty() {
            return Err(StoreError::Invalid { field: "owner_id" });
        }
        if drawing.file_id.trim().is_empty() {
            return Err(StoreError::Invalid { field: "file_id" });
        }
        let record = DrawingRecord {
            id: next_id(),
            owner_id: drawing.owner_id,
            file_id: drawing.file_id,
            title: drawing.title,
            description: drawing.description,
            created_at: Utc::now(),
        };
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        records.push(record.clone());
        debug!(id = %record.id, owner = %record.owner_id, "drawing saved");
        Ok(record)
    }

    fn list_by_owner(
        &self,
        owner_id: &str,
        limit: usize,
    ) -> Result<Vec<DrawingRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        // Later inserts first so equal timestamps still come out newest first.
        let mut items: Vec<DrawingRecord> = records
            .iter()
            .rev()
            .filter(|record| record.owner_id == owner_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);
        Ok(items)
    }
}

fn next_id() -> String {
    let count = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("drawing_{}_{}", Utc::now().timestamp_millis(), count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing(owner: &str, file: &str) -> NewDrawing {
        NewDrawing {
            owner_id: owner.to_string(),
            file_id: file.to_string(),
            title: format!("title {}", file),
            description: String::new(),
        }
    }

    #[test]
    fn lists_only_owner_records_newest_first() {
        let store = MemoryDrawingStore::new();
        store.save(drawing("alice", "f1")).unwrap();
        store.save(drawing("bob", "f2")).unwrap();
        store.save(drawing("alice", "f3")).unwrap();

        let listed = store.list_by_owner("alice", 10).unwrap();
        let files: Vec<&str> = listed.iter().map(|r| r.file_id.as_str()).collect();
        assert_eq!(files, vec!["f3", "f1"]);
        assert!(listed[0].created_at >= listed[1].created_at);
    }

    #[test]
    fn limit_truncates() {
        let store = MemoryDrawingStore::new();
        for idx in 0..5 {
            store.save(drawing("carol", &format!("f{}", idx))).unwrap();
        }
        let listed = store.list_by_owner("carol", 2).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].file_id, "f4");
    }

    #[test]
    fn rejects_missing_references() {
        let store = MemoryDrawingStore::new();
        assert_eq!(
            store.save(drawing("", "f1")).unwrap_err(),
            StoreError::Invalid { field: "owner_id" }
        );
        assert_eq!(
            store.save(drawing("dave", " ")).unwrap_err(),
            StoreError::Invalid { field: "file_id" }
        );
        assert!(store.list_by_owner("dave", 10).unwrap().is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let store = MemoryDrawingStore::new();
        let a = store.save(drawing("erin", "f1")).unwrap();
        let b = store.save(drawing("erin", "f2")).unwrap();
        assert_ne!(a.id, b.id);
    }
}
