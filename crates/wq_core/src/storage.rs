use async_trait::async_trait;

use crate::types::{QuizResult, StoredQuiz};
use crate::Result;

/// Persistence for generated quizzes, one record per source URL.
#[async_trait]
pub trait QuizStorage: Send + Sync {
    /// Stores a new record. Fails with `Error::AlreadyExists` when the URL is already present.
    async fn insert(&self, result: &QuizResult) -> Result<StoredQuiz>;

    async fn find_by_url(&self, url: &str) -> Result<Option<StoredQuiz>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredQuiz>>;

    /// Newest first, plus the total number of stored records.
    async fn list(&self, skip: usize, limit: usize) -> Result<(Vec<StoredQuiz>, usize)>;

    /// Returns `false` when nothing had that id.
    async fn delete(&self, id: i64) -> Result<bool>;
}
