pub mod store;
pub mod types;

pub use store::{DrawingStore, MemoryDrawingStore};
pub use types::{DrawingRecord, NewDrawing};
