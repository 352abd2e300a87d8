//! Best-effort JSON extraction from generation output.
//!
//! Model output is untrusted text: it may wrap the object in prose or code
//! fences. The contract is to take the substring between the first `{` and
//! the last `}` and deserialize it strictly into the target schema —
//! anything that fails that is one uniform extraction error, and each
//! endpoint decides between its documented fallback and PARSE_ERROR.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in generation output")]
    NoObject,

    #[error("generation output failed schema validation: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Extracts and strictly deserializes the outermost JSON object in `raw`.
pub fn extract_json_object<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractError> {
    let first = raw.find('{').ok_or(ExtractError::NoObject)?;
    let last = raw.rfind('}').ok_or(ExtractError::NoObject)?;
    if last <= first {
        return Err(ExtractError::NoObject);
    }
    Ok(serde_json::from_str(&raw[first..=last])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ResumeBody;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Bullets {
        bullets: Vec<String>,
    }

    #[test]
    fn test_extracts_object_surrounded_by_noise() {
        let raw = r#"noise {"summary":"x","skills":[]} trailing"#;
        let body: ResumeBody = extract_json_object(raw).unwrap();
        assert_eq!(body.summary, "x");
        assert!(body.skills.is_empty());
    }

    #[test]
    fn test_no_braces_is_no_object() {
        let err = extract_json_object::<ResumeBody>("just words").unwrap_err();
        assert!(matches!(err, ExtractError::NoObject));
    }

    #[test]
    fn test_reversed_braces_is_no_object() {
        let err = extract_json_object::<ResumeBody>("} nope {").unwrap_err();
        assert!(matches!(err, ExtractError::NoObject));
    }

    #[test]
    fn test_nested_objects_use_outermost_braces() {
        let raw = r#"Here you go: {"bullets":["used {curly} syntax"]} done"#;
        // Inner braces inside a string are fine: first `{` to last `}` spans
        // the whole object.
        let parsed: Bullets = extract_json_object(raw).unwrap();
        assert_eq!(parsed.bullets, vec!["used {curly} syntax"]);
    }

    #[test]
    fn test_malformed_json_is_schema_error() {
        let err = extract_json_object::<Bullets>(r#"{"bullets": [unquoted]}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Schema(_)));
    }

    #[test]
    fn test_wrong_shape_is_schema_error() {
        let err = extract_json_object::<Bullets>(r#"{"bullets": "not-a-list"}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Schema(_)));
    }

    #[test]
    fn test_fenced_output_still_extracts() {
        let raw = "```json\n{\"bullets\":[\"a\"]}\n```";
        let parsed: Bullets = extract_json_object(raw).unwrap();
        assert_eq!(parsed.bullets, vec!["a"]);
    }
}
