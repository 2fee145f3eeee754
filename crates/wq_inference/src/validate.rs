//! Filters parsed model output down to well-formed quiz items and topic names.
//!
//! Malformed entries are dropped one by one; validation itself never fails.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;
use wq_core::{Difficulty, QuizQuestion};

pub const OPTIONS_PER_QUESTION: usize = 4;
pub const MAX_RELATED_TOPICS: usize = 7;

const REQUIRED_FIELDS: &[&str] = &["question", "options", "answer", "difficulty", "explanation"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Also drop questions whose answer is not one of their options.
    pub strict_answers: bool,
}

pub fn validate_quiz(parsed: &Value, policy: ValidationPolicy) -> Vec<QuizQuestion> {
    let Some(items) = parsed.get("quiz").and_then(Value::as_array) else {
        return Vec::new();
    };

    let questions: Vec<QuizQuestion> = items
        .iter()
        .filter_map(|item| validate_question(item, policy))
        .collect();

    debug!("Kept {} of {} quiz items", questions.len(), items.len());
    questions
}

fn validate_question(item: &Value, policy: ValidationPolicy) -> Option<QuizQuestion> {
    let fields = item.as_object()?;
    if !REQUIRED_FIELDS.iter().all(|field| fields.contains_key(*field)) {
        return None;
    }

    let question = fields["question"].as_str()?.to_string();
    if question.trim().is_empty() {
        return None;
    }
    let answer = fields["answer"].as_str()?.to_string();
    let options = validate_options(&fields["options"])?;

    if policy.strict_answers && !options.contains(&answer) {
        return None;
    }

    let difficulty = fields["difficulty"]
        .as_str()
        .map(Difficulty::normalize)
        .unwrap_or_default();
    let explanation = match &fields["explanation"] {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };

    Some(QuizQuestion {
        question,
        options,
        answer,
        difficulty,
        explanation,
    })
}

fn validate_options(value: &Value) -> Option<Vec<String>> {
    let raw = value.as_array()?;
    if raw.len() != OPTIONS_PER_QUESTION {
        return None;
    }

    let options: Vec<String> = raw
        .iter()
        .map(|option| option.as_str().map(str::to_string))
        .collect::<Option<_>>()?;

    let distinct: HashSet<&String> = options.iter().collect();
    (distinct.len() == OPTIONS_PER_QUESTION).then_some(options)
}

/// String entries of `topics`, minus the article's own title, at most seven.
pub fn validate_topics(parsed: &Value, title: &str) -> Vec<String> {
    let Some(items) = parsed.get("topics").and_then(Value::as_array) else {
        return Vec::new();
    };

    let title = title.to_lowercase();
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|topic| topic.to_lowercase() != title)
        .take(MAX_RELATED_TOPICS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item() -> Value {
        json!({
            "question": "Where was Turing born?",
            "options": ["London", "Paris", "Berlin", "Rome"],
            "answer": "London",
            "difficulty": "Easy",
            "explanation": "Maida Vale, London."
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut item = item();
        item[field] = value;
        item
    }

    #[test]
    fn test_valid_item_is_normalized() {
        let questions = validate_quiz(&json!({ "quiz": [item()] }), ValidationPolicy::default());
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
        assert_eq!(questions[0].options.len(), 4);
    }

    #[test]
    fn test_unknown_difficulty_becomes_medium() {
        let parsed = json!({ "quiz": [with("difficulty", json!("expert"))] });
        let questions = validate_quiz(&parsed, ValidationPolicy::default());
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_null_explanation_becomes_empty() {
        let parsed = json!({ "quiz": [with("explanation", Value::Null)] });
        let questions = validate_quiz(&parsed, ValidationPolicy::default());
        assert_eq!(questions[0].explanation, "");
    }

    #[test]
    fn test_malformed_items_are_dropped() {
        let mut missing = item();
        missing.as_object_mut().unwrap().remove("explanation");

        let parsed = json!({
            "quiz": [
                item(),
                missing,
                with("options", json!(["A", "B", "C"])),
                with("options", json!(["A", "B", "C", "D", "E"])),
                with("options", json!(["A", "A", "B", "C"])),
                with("options", json!(["A", "B", "C", 4])),
                with("question", json!(12)),
                with("question", json!("")),
                with("question", json!("   ")),
                "not an object",
            ]
        });

        assert_eq!(validate_quiz(&parsed, ValidationPolicy::default()).len(), 1);
    }

    #[test]
    fn test_answer_membership_is_opt_in() {
        let parsed = json!({ "quiz": [with("answer", json!("Madrid"))] });
        assert_eq!(validate_quiz(&parsed, ValidationPolicy::default()).len(), 1);
        let strict = ValidationPolicy { strict_answers: true };
        assert!(validate_quiz(&parsed, strict).is_empty());
    }

    #[test]
    fn test_missing_or_empty_quiz_key() {
        let policy = ValidationPolicy::default();
        assert!(validate_quiz(&json!({}), policy).is_empty());
        assert!(validate_quiz(&json!({ "quiz": [] }), policy).is_empty());
        assert!(validate_quiz(&json!({ "quiz": "nope" }), policy).is_empty());
    }

    #[test]
    fn test_topics_drop_title_and_non_strings() {
        let parsed = json!({
            "topics": ["alan turing", "Enigma machine", 7, "Bletchley Park", null]
        });
        assert_eq!(
            validate_topics(&parsed, "Alan Turing"),
            vec!["Enigma machine", "Bletchley Park"]
        );
    }

    #[test]
    fn test_topics_are_capped() {
        let topics: Vec<String> = (1..=10).map(|i| format!("Topic {i}")).collect();
        let result = validate_topics(&json!({ "topics": topics }), "Other");
        assert_eq!(result.len(), MAX_RELATED_TOPICS);
        assert_eq!(result[6], "Topic 7");
        assert!(validate_topics(&json!({}), "Other").is_empty());
    }
}
