//! Structured-output parsing for reasoning service responses.
//!
//! Models asked for JSON often wrap it in a markdown code fence or add a
//! sentence of prose around it. Parsing strips the fence, isolates the
//! outermost object, then deserializes into a typed shape. Semantic checks
//! happen in the caller and report through [`StructuredOutputError::Invalid`].

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure to turn a model response into the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuredOutputError {
    #[error("response was empty")]
    Empty,

    #[error("no JSON object found in response")]
    NoJsonObject,

    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("invalid response: {0}")]
    Invalid(String),
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````)
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening fence line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Slice from the first `{` to the last `}`
fn isolate_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse a model response into `T`
pub fn parse_json_object<T: DeserializeOwned>(raw: &str) -> Result<T, StructuredOutputError> {
    let unfenced = strip_code_fences(raw);
    if unfenced.is_empty() {
        return Err(StructuredOutputError::Empty);
    }

    let object = isolate_object(unfenced).ok_or(StructuredOutputError::NoJsonObject)?;

    serde_json::from_str(object).map_err(|e| StructuredOutputError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        claims: Vec<String>,
    }

    #[test]
    fn test_strip_json_fence() {
        let raw = "```json\n{\"claims\": []}\n```";
        assert_eq!(strip_code_fences(raw), "{\"claims\": []}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let raw = "  ```\n{\"a\": 1}\n```  ";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_single_line_fence() {
        assert_eq!(strip_code_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_passthrough() {
        assert_eq!(strip_code_fences(" {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_with_surrounding_prose() {
        let raw = "Here are the claims:\n{\"claims\": [\"A\"]}\nLet me know!";
        let parsed: Sample = parse_json_object(raw).unwrap();
        assert_eq!(parsed.claims, vec!["A"]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_json_object::<Sample>("```json\n```"),
            Err(StructuredOutputError::Empty)
        );
        assert_eq!(
            parse_json_object::<Sample>("no json here"),
            Err(StructuredOutputError::NoJsonObject)
        );
        assert!(matches!(
            parse_json_object::<Sample>("{\"claims\": [1, }"),
            Err(StructuredOutputError::Malformed(_))
        ));
        // Wrong shape is a deserialization failure, not a panic
        assert!(matches!(
            parse_json_object::<Sample>("{\"items\": []}"),
            Err(StructuredOutputError::Malformed(_))
        ));
    }
}
