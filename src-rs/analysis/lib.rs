pub mod analyzer;
pub mod normalize;
pub mod prompt;
pub mod types;
pub mod validate;

pub use analyzer::{strip_data_url_prefix, ImageAnalyzer};
pub use normalize::{find_json_array, normalize_response};
pub use prompt::render_prompt;
pub use types::{AnalysisEntry, AnalysisRequest, AnalysisResult};
pub use validate::validate_request;
