use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A validated `/calculate` body; built by `validate_request`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisRequest {
    /// Base64 image, with or without a `data:image/...;base64,` prefix.
    pub image: String,
    pub variables: Map<String, Value>,
}

/// One interpreted item of a drawing.
///
/// Serialized with the short keys the model is asked to produce (`expr`,
/// `result`, `assign`); any other keys the model returned ride along in
/// `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    #[serde(rename = "expr")]
    pub expression: String,
    pub result: Value,
    #[serde(rename = "assign")]
    pub is_assignment: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type AnalysisResult = Vec<AnalysisEntry>;

impl AnalysisEntry {
    pub fn fallback(text: &str, placeholder: &str) -> Self {
        Self {
            expression: text.to_string(),
            result: Value::String(placeholder.to_string()),
            is_assignment: false,
            extra: Map::new(),
        }
    }

    /// Builds an entry from one element of the model's array. Never fails:
    /// missing fields get neutral defaults and the assignment flag is
    /// coerced by truthiness.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let expression = map.remove("expr").map(render_text).unwrap_or_default();
                let result = map.remove("result").unwrap_or(Value::Null);
                let is_assignment = map.remove("assign").map_or(false, |v| is_truthy(&v));
                Self {
                    expression,
                    result,
                    is_assignment,
                    extra: map,
                }
            }
            other => Self {
                expression: render_text(other),
                result: Value::Null,
                is_assignment: false,
                extra: Map::new(),
            },
        }
    }
}

fn render_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(num) => num.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
