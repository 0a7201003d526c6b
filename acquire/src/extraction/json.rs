//! Lenient JSON object extraction from model output.

use serde_json::{Map, Value};

/// Extracts a single JSON object from free-form text.
///
/// Tries the whole trimmed text first. Failing that, it parses the span from
/// the first `{` to the last `}` inclusive, which recovers objects wrapped in
/// prose.
///
/// The span heuristic is best-effort and not a brace matcher: text holding
/// several independent `{...}` blocks yields one span covering all of them,
/// which usually fails to parse. Anything that is not an object (arrays,
/// scalars) is not accepted.
///
/// # Examples
///
/// ```
/// use acquire::extraction::extract_json_object;
///
/// let value = extract_json_object("I think the answer is {\"alex\": 4}").unwrap();
/// assert_eq!(value["alex"], 4);
///
/// assert!(extract_json_object("no braces here").is_none());
/// ```
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    if let Some(object) = parse_object(text.trim()) {
        return Some(object);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&text[start..=end])
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_parse() {
        let value = extract_json_object(r#"  {"sam": 2, "alex": 4}  "#).unwrap();
        assert_eq!(Value::Object(value), json!({"sam": 2, "alex": 4}));
    }

    #[test]
    fn test_wrapped_in_prose() {
        let value =
            extract_json_object(r#"I think the answer is {"alex": 4, "sam": 2}. Hope it helps!"#)
                .unwrap();
        assert_eq!(Value::Object(value), json!({"alex": 4, "sam": 2}));
    }

    #[test]
    fn test_markdown_fence() {
        let text = "```json\n{\"alex\": {\"lines\": 3}}\n```";
        let value = extract_json_object(text).unwrap();
        assert_eq!(value["alex"]["lines"], 3);
    }

    #[test]
    fn test_empty_object_is_accepted() {
        assert_eq!(extract_json_object("{}"), Some(Map::new()));
    }

    #[test]
    fn test_no_braces() {
        assert!(extract_json_object("").is_none());
        assert!(extract_json_object("alex said four things").is_none());
    }

    #[test]
    fn test_reversed_braces() {
        assert!(extract_json_object("} nothing {").is_none());
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("42").is_none());
        assert!(extract_json_object("\"alex\"").is_none());
    }

    #[test]
    fn test_object_inside_array_is_recovered() {
        let value = extract_json_object(r#"[{"a": 1}]"#).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_multiple_blocks_are_not_separated() {
        // The span covers both blocks and the text between them.
        assert!(extract_json_object(r#"first {"a": 1} then {"b": 2}"#).is_none());
    }

    #[test]
    fn test_malformed_span() {
        assert!(extract_json_object("here: {alex: 4}").is_none());
    }
}
