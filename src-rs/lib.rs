pub mod config;
pub mod error;
pub mod helpers;

#[path = "llm/lib.rs"]
pub mod llm;
#[path = "analysis/lib.rs"]
pub mod analysis;
#[path = "drawings/lib.rs"]
pub mod drawings;
#[path = "api/lib.rs"]
pub mod api;

pub use analysis::{AnalysisEntry, AnalysisRequest, AnalysisResult, ImageAnalyzer};
pub use config::AnalyzerConfig;
pub use error::{AnalyzeError, ConfigError, StoreError, ValidationError};
