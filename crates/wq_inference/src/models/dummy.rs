use async_trait::async_trait;
use serde_json::json;
use wq_core::{InferenceModel, Result};

const TITLE_PREFIX: &str = "Article title:";
const DEFAULT_QUESTIONS: usize = 5;
const DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];

/// Offline stand-in that answers every prompt with well-formed JSON built from the prompt itself.
#[derive(Debug, Default, Clone)]
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

fn title_of(prompt: &str) -> &str {
    prompt
        .lines()
        .find_map(|line| line.strip_prefix(TITLE_PREFIX))
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or("this article")
}

fn requested_questions(prompt: &str) -> usize {
    prompt
        .split("Write exactly ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|count| count.parse().ok())
        .unwrap_or(DEFAULT_QUESTIONS)
}

fn quiz_reply(title: &str, count: usize) -> String {
    let quiz: Vec<_> = (1..=count)
        .map(|n| {
            let answer = format!("{title} fact {n}");
            json!({
                "question": format!("Which statement about {title} is number {n}?"),
                "options": [
                    answer.clone(),
                    format!("{title} myth {n}a"),
                    format!("{title} myth {n}b"),
                    format!("{title} myth {n}c"),
                ],
                "answer": answer,
                "difficulty": DIFFICULTIES[(n - 1) % DIFFICULTIES.len()],
                "explanation": format!("Placeholder question {n} generated offline."),
            })
        })
        .collect();
    json!({ "quiz": quiz }).to_string()
}

fn topics_reply(title: &str) -> String {
    let topics: Vec<String> = ["History", "Overview", "Influence", "Criticism", "Timeline"]
        .iter()
        .map(|aspect| format!("{aspect} of {title}"))
        .collect();
    json!({ "topics": topics }).to_string()
}

#[async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let title = title_of(prompt);
        if prompt.contains("\"topics\": [") {
            Ok(topics_reply(title))
        } else {
            Ok(quiz_reply(title, requested_questions(prompt)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{quiz_prompt, related_topics_prompt};
    use crate::{parse_json_response, validate_quiz, validate_topics, ValidationPolicy};
    use wq_core::KeyEntities;

    #[tokio::test]
    async fn test_quiz_reply_passes_strict_validation() {
        let model = DummyModel::new();
        let raw = model
            .complete(&quiz_prompt("Alan Turing", "Some content.", 3))
            .await
            .unwrap();

        let parsed = parse_json_response(&raw).unwrap();
        let strict = ValidationPolicy { strict_answers: true };
        let questions = validate_quiz(&parsed, strict);
        assert_eq!(questions.len(), 3);
        assert!(questions[0].question.contains("Alan Turing"));
    }

    #[tokio::test]
    async fn test_topics_reply() {
        let model = DummyModel::new();
        let raw = model
            .complete(&related_topics_prompt("Alan Turing", &[], &KeyEntities::default()))
            .await
            .unwrap();

        let topics = validate_topics(&parse_json_response(&raw).unwrap(), "Alan Turing");
        assert_eq!(topics.len(), 5);
        assert_eq!(topics[0], "History of Alan Turing");
    }

    #[test]
    fn test_prompt_sniffing_defaults() {
        assert_eq!(title_of("no title line"), "this article");
        assert_eq!(requested_questions("no count"), DEFAULT_QUESTIONS);
    }
}
