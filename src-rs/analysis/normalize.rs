use serde_json::Value;
use tracing::{debug, warn};

use super::types::{AnalysisEntry, AnalysisResult};

pub const NO_ARRAY_PLACEHOLDER: &str = "See expression for details";
pub const UNPARSEABLE_PLACEHOLDER: &str = "Could not parse structured result";

/// Turns a free-form model reply into a result list.
///
/// The first JSON array in the text wins. Text without an array, or whose
/// array does not parse, yields a single entry carrying the raw text. This
/// function never fails.
pub fn normalize_response(text: &str) -> AnalysisResult {
    let candidate = match find_json_array(text) {
        Some(candidate) => candidate,
        None => {
            debug!("model reply has no JSON array, using raw text");
            return vec![AnalysisEntry::fallback(text, NO_ARRAY_PLACEHOLDER)];
        }
    };

    match serde_json::from_str::<Vec<Value>>(candidate) {
        Ok(items) => items.into_iter().map(AnalysisEntry::from_value).collect(),
        Err(err) => {
            warn!(error = %err, "model reply contains an unparseable array");
            vec![AnalysisEntry::fallback(text, UNPARSEABLE_PLACEHOLDER)]
        }
    }
}

/// Locates the first `[ ... ]` span in `text`.
///
/// Scans from the first `[` keeping bracket depth, skipping over JSON string
/// literals, and stops where the depth returns to zero. When that `[` never
/// closes the span runs to the last `]` in the text instead.
pub fn find_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(result: &AnalysisResult) -> Value {
        serde_json::to_value(result).unwrap()
    }

    #[test]
    fn extracts_array_surrounded_by_prose() {
        let result = normalize_response(r#"Here: [{"expr":"2+2","result":4}] done"#);
        assert_eq!(wire(&result), json!([{"expr": "2+2", "result": 4, "assign": false}]));
    }

    #[test]
    fn text_without_brackets_falls_back() {
        let result = normalize_response("x = 5");
        assert_eq!(
            wire(&result),
            json!([{"expr": "x = 5", "result": "See expression for details", "assign": false}])
        );
    }

    #[test]
    fn assignments_keep_their_flag() {
        let result = normalize_response(
            r#"[{"expr":"x","result":2,"assign":true},{"expr":"y","result":5,"assign":true}]"#,
        );
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|entry| entry.is_assignment));
        assert_eq!(result[1].expression, "y");
        assert_eq!(result[1].result, json!(5));
    }

    #[test]
    fn invalid_json_in_brackets_falls_back() {
        let text = "the answer is [x + 1, definitely]";
        let result = normalize_response(text);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].expression, text);
        assert_eq!(result[0].result, json!(UNPARSEABLE_PLACEHOLDER));
        assert!(!result[0].is_assignment);
    }

    #[test]
    fn fenced_reply_is_unwrapped() {
        let text = "```json\n[\n  {\"expr\": \"a heart\", \"result\": \"love\"}\n]\n```";
        let result = normalize_response(text);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].expression, "a heart");
        assert_eq!(result[0].result, json!("love"));
    }

    #[test]
    fn truthy_assign_values_are_coerced() {
        let result = normalize_response(
            r#"[{"expr":"a","result":1,"assign":"yes"},{"expr":"b","result":2,"assign":0},{"expr":"c","result":3,"assign":null}]"#,
        );
        let flags: Vec<bool> = result.iter().map(|entry| entry.is_assignment).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn brackets_inside_strings_do_not_end_the_scan() {
        let text = r#"ok [{"expr":"f[x] = ]","result":"[1]"}] trailing ]"#;
        assert_eq!(find_json_array(text), Some(r#"[{"expr":"f[x] = ]","result":"[1]"}]"#));
        let result = normalize_response(text);
        assert_eq!(result[0].expression, "f[x] = ]");
    }

    #[test]
    fn only_the_first_array_is_used() {
        let result =
            normalize_response(r#"[{"expr":"1","result":1}] and [{"expr":"2","result":2}]"#);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].expression, "1");
    }

    #[test]
    fn unclosed_first_bracket_uses_greedy_span() {
        assert_eq!(find_json_array("a [ b ] c [ d"), Some("[ b ]"));
        assert_eq!(find_json_array("[[1, 2] tail ]"), Some("[[1, 2] tail ]"));
        assert_eq!(find_json_array("[[1, 2]"), Some("[[1, 2]"));
        assert_eq!(find_json_array("] ["), None);
        assert_eq!(find_json_array("no brackets"), None);
    }

    #[test]
    fn normalizing_normalized_output_is_stable() {
        let first = normalize_response(
            r#"Sure! [{"expr":"x","result":2,"assign":1,"note":"solved"},{"expr":"2*3","result":6}]"#,
        );
        let text = serde_json::to_string(&first).unwrap();
        let second = normalize_response(&text);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_array_yields_no_entries() {
        assert!(normalize_response("[]").is_empty());
    }
}
