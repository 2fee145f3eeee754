use std::sync::Arc;

use tracing::{info, warn};
use wq_core::{Error, QuizHistory, QuizListItem, QuizResponse, QuizStorage, Result};

use crate::generator::QuizGenerator;

pub const DEFAULT_QUESTION_COUNT: usize = 7;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Generation with a per-URL cache in front of it, plus read and delete access to past quizzes.
#[derive(Clone)]
pub struct QuizService {
    generator: QuizGenerator,
    storage: Arc<dyn QuizStorage>,
    question_count: usize,
}

impl QuizService {
    pub fn new(generator: QuizGenerator, storage: Arc<dyn QuizStorage>) -> Self {
        Self {
            generator,
            storage,
            question_count: DEFAULT_QUESTION_COUNT,
        }
    }

    pub fn with_question_count(mut self, count: usize) -> Self {
        self.question_count = count;
        self
    }

    pub fn generator(&self) -> &QuizGenerator {
        &self.generator
    }

    /// Returns the stored quiz for `url` if there is one, otherwise generates and stores it.
    pub async fn generate(&self, url: &str) -> Result<QuizResponse> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::InvalidInput("URL is required".to_string()));
        }

        if let Some(existing) = self.storage.find_by_url(url).await? {
            info!("Returning cached quiz for URL: {}", url);
            return Ok(QuizResponse::from(&existing));
        }

        let result = self.generator.produce_quiz(url, self.question_count).await?;

        let stored = match self.storage.insert(&result).await {
            Ok(stored) => stored,
            Err(Error::AlreadyExists(_)) => {
                warn!("Quiz for {} was stored concurrently, returning that one", url);
                self.storage
                    .find_by_url(url)
                    .await?
                    .ok_or_else(|| Error::Storage(format!("Quiz for {} vanished after insert conflict", url)))?
            }
            Err(e) => return Err(e),
        };

        info!("Quiz created with ID: {}", stored.id);
        Ok(QuizResponse::from(&stored))
    }

    pub async fn history(&self, skip: usize, limit: usize) -> Result<QuizHistory> {
        let (records, total) = self.storage.list(skip, limit).await?;
        Ok(QuizHistory {
            quizzes: records.iter().map(QuizListItem::from).collect(),
            total,
        })
    }

    pub async fn get(&self, id: i64) -> Result<QuizResponse> {
        self.storage
            .find_by_id(id)
            .await?
            .map(|stored| QuizResponse::from(&stored))
            .ok_or_else(|| Error::NotFound(format!("Quiz with ID {} not found", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.storage.delete(id).await? {
            info!("Deleted quiz {}", id);
            Ok(())
        } else {
            Err(Error::NotFound(format!("Quiz with ID {} not found", id)))
        }
    }
}
