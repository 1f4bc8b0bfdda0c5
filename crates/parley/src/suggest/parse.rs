//! Strict extraction of reply options from raw provider text
//!
//! The model is asked for a JSON array of four strings, but replies
//! arrive as free-form text: possibly fenced in a code block, possibly
//! wrapped in an object. Anything that does not validate to exactly
//! four strings rejects the whole batch; nothing is partially accepted.

use serde_json::Value;
use thiserror::Error;

use super::history::{OPTION_COUNT, OptionBatch};

/// Why a provider reply could not be turned into an option batch
#[derive(Debug, Error)]
pub enum ParseError {
    /// The reply text was not valid JSON
    #[error("provider reply is not valid JSON: {0}")]
    Json(String),
    /// The parsed value (after unwrapping) was not a list
    #[error("provider reply is not a list of options")]
    NotAList,
    /// The list did not hold exactly four entries
    #[error("expected exactly 4 options, got {0}")]
    WrongCount(usize),
    /// An entry was not a string
    #[error("option at index {0} is not a string")]
    NotAString(usize),
}

/// Extract exactly four trimmed option strings from a raw reply.
pub fn parse_options(raw: &str) -> Result<OptionBatch, ParseError> {
    let content = strip_code_fence(raw.trim());

    let parsed: Value =
        serde_json::from_str(content).map_err(|e| ParseError::Json(e.to_string()))?;

    // The model sometimes wraps the array in {"options": [...]}.
    let list = match parsed {
        Value::Object(mut map) => match map.remove("options") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    };

    let Value::Array(items) = list else {
        return Err(ParseError::NotAList);
    };
    if items.len() != OPTION_COUNT {
        return Err(ParseError::WrongCount(items.len()));
    }

    let mut options = [const { String::new() }; OPTION_COUNT];
    for (index, (slot, item)) in options.iter_mut().zip(items).enumerate() {
        match item {
            Value::String(s) => *slot = s.trim().to_string(),
            _ => return Err(ParseError::NotAString(index)),
        }
    }

    Ok(OptionBatch::new(options))
}

/// Drop a surrounding triple-backtick fence, with an optional json tag.
///
/// Content runs up to the last closing fence; a fence that never closes
/// falls back to the original text.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_OPTIONS: &str =
        r#"["Option A: Sure.", "Option B: Maybe later.", "Option C: Tell me more.", "Option D: I need rest."]"#;

    fn expected() -> Vec<&'static str> {
        vec![
            "Option A: Sure.",
            "Option B: Maybe later.",
            "Option C: Tell me more.",
            "Option D: I need rest.",
        ]
    }

    #[test]
    fn parses_a_bare_array() {
        let batch = parse_options(FOUR_OPTIONS).unwrap();
        assert_eq!(batch.iter().collect::<Vec<_>>(), expected());
    }

    #[test]
    fn fenced_and_unfenced_replies_parse_identically() {
        let bare = parse_options(FOUR_OPTIONS).unwrap();
        let fenced = parse_options(&format!("```json\n{FOUR_OPTIONS}\n```")).unwrap();
        let fenced_upper = parse_options(&format!("```JSON\n{FOUR_OPTIONS}\n```")).unwrap();
        let fenced_untagged = parse_options(&format!("```\n{FOUR_OPTIONS}\n```")).unwrap();

        assert_eq!(bare, fenced);
        assert_eq!(bare, fenced_upper);
        assert_eq!(bare, fenced_untagged);
    }

    #[test]
    fn object_wrapped_array_parses_identically() {
        let bare = parse_options(FOUR_OPTIONS).unwrap();
        let wrapped = parse_options(&format!(r#"{{"options": {FOUR_OPTIONS}}}"#)).unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn unclosed_fence_falls_back_to_original_text() {
        // No closing fence: the original text is not valid JSON either,
        // so this is a malformed-output error, not a panic or a partial.
        let err = parse_options("```json\n[\"a\"").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn options_are_trimmed_and_order_preserved() {
        let batch =
            parse_options(r#"["  first  ", "second", "  third", "fourth  "]"#).unwrap();
        assert_eq!(
            batch.iter().collect::<Vec<_>>(),
            vec!["first", "second", "third", "fourth"]
        );
    }

    #[test]
    fn rejects_non_json_text() {
        let err = parse_options("I would suggest saying hello back!").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn rejects_three_options() {
        let err = parse_options(r#"["a", "b", "c"]"#).unwrap_err();
        assert!(matches!(err, ParseError::WrongCount(3)));
    }

    #[test]
    fn rejects_five_options() {
        let err = parse_options(r#"["a", "b", "c", "d", "e"]"#).unwrap_err();
        assert!(matches!(err, ParseError::WrongCount(5)));
    }

    #[test]
    fn rejects_a_non_string_element() {
        let err = parse_options(r#"["a", "b", 3, "d"]"#).unwrap_err();
        assert!(matches!(err, ParseError::NotAString(2)));
    }

    #[test]
    fn rejects_an_object_without_an_options_key() {
        let err = parse_options(r#"{"replies": ["a", "b", "c", "d"]}"#).unwrap_err();
        assert!(matches!(err, ParseError::NotAList));
    }

    #[test]
    fn rejects_a_plain_string_value() {
        let err = parse_options(r#""just one suggestion""#).unwrap_err();
        assert!(matches!(err, ParseError::NotAList));
    }
}
