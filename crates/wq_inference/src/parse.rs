use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::debug;
use wq_core::{Error, Result};

lazy_static! {
    static ref FENCED_BLOCK: Regex =
        Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("FENCED_BLOCK is a valid regex");
}

type Extractor = fn(&str) -> Option<&str>;

/// Tried in order; the first candidate that parses to a JSON object wins.
const STRATEGIES: &[(&str, Extractor)] = &[
    ("whole", whole_text),
    ("fenced", fenced_block),
    ("braces", brace_span),
];

/// Pulls a JSON object out of free-form model output.
pub fn parse_json_response(raw: &str) -> Result<Value> {
    let text = raw.trim();

    for (name, extract) in STRATEGIES {
        let Some(candidate) = extract(text) else {
            continue;
        };
        match serde_json::from_str::<Value>(candidate) {
            Ok(value) if value.is_object() => {
                debug!("Parsed model output with the {} strategy", name);
                return Ok(value);
            }
            _ => continue,
        }
    }

    Err(Error::parse(text))
}

fn whole_text(text: &str) -> Option<&str> {
    Some(text)
}

fn fenced_block(text: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wq_core::error::EXCERPT_CHARS;

    #[test]
    fn test_plain_json() {
        let value = parse_json_response(r#"  {"topics": ["A", "B"]} "#).unwrap();
        assert_eq!(value, json!({"topics": ["A", "B"]}));
    }

    #[test]
    fn test_fenced_block_with_and_without_tag() {
        let tagged = "Here you go:\n```json\n{\"quiz\": []}\n```\nEnjoy!";
        assert_eq!(parse_json_response(tagged).unwrap(), json!({"quiz": []}));

        let bare = "```\n{\"topics\": [\"X\"]}\n```";
        assert_eq!(parse_json_response(bare).unwrap(), json!({"topics": ["X"]}));
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let raw = r#"Sure! The result is {"topics": ["Enigma"]} as requested."#;
        assert_eq!(parse_json_response(raw).unwrap(), json!({"topics": ["Enigma"]}));
    }

    #[test]
    fn test_non_object_json_is_not_accepted() {
        assert!(matches!(
            parse_json_response(r#"["a", "b"]"#),
            Err(Error::Parse { .. })
        ));
        assert!(parse_json_response("42").is_err());
    }

    #[test]
    fn test_broken_fence_falls_through_to_braces() {
        let raw = "```json\n{\"quiz\": [}\n```\n{\"quiz\": [1]}";
        // Fenced candidate is malformed; the first-brace to last-brace span is also malformed.
        assert!(parse_json_response(raw).is_err());

        let raw = "```json\nnot json\n```\n{\"quiz\": [1]}";
        assert_eq!(parse_json_response(raw).unwrap(), json!({"quiz": [1]}));
    }

    #[test]
    fn test_failure_carries_bounded_excerpt() {
        let raw = format!("no json here {}", "z".repeat(1_000));
        match parse_json_response(&raw) {
            Err(Error::Parse { excerpt }) => {
                assert!(excerpt.starts_with("no json here"));
                assert_eq!(excerpt.chars().count(), EXCERPT_CHARS);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(parse_json_response("   "), Err(Error::Parse { .. })));
    }
}
