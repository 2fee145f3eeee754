use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most entries kept per entity category.
pub const MAX_ENTITIES_PER_KIND: usize = 5;

/// Structured result of extracting one Wikipedia article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub title: String,
    pub summary: String,
    pub sections: Vec<String>,
    pub key_entities: KeyEntities,
    pub content: String,
    pub raw_markup: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntities {
    /// Never filled by the extractor; kept so the shape stays stable for consumers.
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl KeyEntities {
    pub fn add_organization(&mut self, name: &str) -> bool {
        push_unique(&mut self.organizations, name)
    }

    pub fn add_location(&mut self, name: &str) -> bool {
        push_unique(&mut self.locations, name)
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.organizations.is_empty() && self.locations.is_empty()
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) -> bool {
    if list.len() >= MAX_ENTITIES_PER_KIND || list.iter().any(|existing| existing == name) {
        return false;
    }
    list.push(name.to_string());
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive; anything unrecognised becomes `Medium`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub difficulty: Difficulty,
    pub explanation: String,
}

/// Everything one generation run produces. This is the persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub article: ArticleRecord,
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredQuiz {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub result: QuizResult,
}

/// Public view of a stored quiz. Both fresh and cached quizzes are shaped through here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub key_entities: KeyEntities,
    pub sections: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
    pub related_topics: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredQuiz> for QuizResponse {
    fn from(stored: &StoredQuiz) -> Self {
        let article = &stored.result.article;
        QuizResponse {
            id: stored.id,
            url: article.url.clone(),
            title: article.title.clone(),
            summary: article.summary.clone(),
            key_entities: article.key_entities.clone(),
            sections: article.sections.clone(),
            quiz: stored.result.quiz.clone(),
            related_topics: stored.result.related_topics.clone(),
            created_at: stored.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizListItem {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredQuiz> for QuizListItem {
    fn from(stored: &StoredQuiz) -> Self {
        QuizListItem {
            id: stored.id,
            url: stored.result.article.url.clone(),
            title: stored.result.article.title.clone(),
            question_count: stored.result.quiz.len(),
            created_at: stored.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizHistory {
    pub quizzes: Vec<QuizListItem>,
    pub total: usize,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_difficulty_normalization() {
        assert_eq!(Difficulty::normalize("EASY"), Difficulty::Easy);
        assert_eq!(Difficulty::normalize(" Hard "), Difficulty::Hard);
        assert_eq!(Difficulty::normalize("medium"), Difficulty::Medium);
        assert_eq!(Difficulty::normalize("expert"), Difficulty::Medium);
        assert_eq!(Difficulty::normalize(""), Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
        assert!(serde_json::from_str::<Difficulty>("\"Expert\"").is_err());
    }

    #[test]
    fn test_entities_are_unique_and_capped() {
        let mut entities = KeyEntities::default();
        assert!(entities.add_location("France"));
        assert!(!entities.add_location("France"));
        for name in ["Spain", "Italy", "Greece", "Malta", "Cyprus"] {
            entities.add_location(name);
        }
        assert_eq!(
            entities.locations,
            vec!["France", "Spain", "Italy", "Greece", "Malta"]
        );
        assert!(entities.people.is_empty());
    }

    #[test]
    fn test_response_shaping_from_stored_record() {
        let stored = StoredQuiz {
            id: 3,
            created_at: Utc::now(),
            result: QuizResult {
                article: article(),
                quiz: vec![question()],
                related_topics: vec!["Enigma machine".to_string()],
            },
        };

        let response = QuizResponse::from(&stored);
        assert_eq!(response.id, 3);
        assert_eq!(response.title, "Alan Turing");
        assert_eq!(response.quiz.len(), 1);

        let item = QuizListItem::from(&stored);
        assert_eq!(item.question_count, 1);
        assert_eq!(item.url, stored.result.article.url);
    }

    #[test]
    fn test_quiz_result_survives_storage_serialization() {
        let result = QuizResult {
            article: article(),
            quiz: vec![question()],
            related_topics: vec![],
        };
        let json = serde_json::to_string(&result).unwrap();
        let restored: QuizResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, restored);
    }
}
