use serde_json::Value;

use super::types::AnalysisRequest;
use crate::error::ValidationError;

/// Checks the shape of a `/calculate` body: a non-empty string `image` and
/// an object `dict_of_vars` (`variables` is accepted as well).
pub fn validate_request(body: &Value) -> Result<AnalysisRequest, ValidationError> {
    let object = body
        .as_object()
        .ok_or_else(|| ValidationError::new("body", "must be a JSON object"))?;

    let image = match object.get("image") {
        Some(Value::String(image)) if !image.is_empty() => image.clone(),
        Some(Value::String(_)) => return Err(ValidationError::new("image", "must not be empty")),
        Some(_) => return Err(ValidationError::new("image", "must be a string")),
        None => return Err(ValidationError::new("image", "is required")),
    };

    let variables = match object.get("dict_of_vars").or_else(|| object.get("variables")) {
        Some(Value::Object(vars)) => vars.clone(),
        Some(_) => return Err(ValidationError::new("dict_of_vars", "must be an object")),
        None => return Err(ValidationError::new("dict_of_vars", "is required")),
    };

    Ok(AnalysisRequest { image, variables })
}
