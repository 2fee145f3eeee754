use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use wq_core::{Error, QuizResult, QuizStorage, Result, StoredQuiz};

#[derive(Debug, Default)]
struct MemoryStore {
    next_id: i64,
    records: Vec<StoredQuiz>,
}

impl MemoryStore {
    fn insert(&mut self, result: &QuizResult) -> Result<StoredQuiz> {
        let url = &result.article.url;
        if self.records.iter().any(|r| &r.result.article.url == url) {
            return Err(Error::AlreadyExists(format!("Quiz for {}", url)));
        }

        self.next_id += 1;
        let stored = StoredQuiz {
            id: self.next_id,
            created_at: Utc::now(),
            result: result.clone(),
        };
        self.records.push(stored.clone());
        Ok(stored)
    }

    fn newest_first(&self) -> impl Iterator<Item = &StoredQuiz> {
        // Ids grow with insertion time, so reverse insertion order is newest first.
        self.records.iter().rev()
    }
}

/// Process-local storage behind an async read/write lock.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    store: RwLock<MemoryStore>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStorage for MemoryStorage {
    async fn insert(&self, result: &QuizResult) -> Result<StoredQuiz> {
        let mut store = self.store.write().await;
        store.insert(result)
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<StoredQuiz>> {
        let store = self.store.read().await;
        Ok(store
            .records
            .iter()
            .find(|r| r.result.article.url == url)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredQuiz>> {
        let store = self.store.read().await;
        Ok(store.records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<(Vec<StoredQuiz>, usize)> {
        let store = self.store.read().await;
        let page = store.newest_first().skip(skip).take(limit).cloned().collect();
        Ok((page, store.records.len()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut store = self.store.write().await;
        let before = store.records.len();
        store.records.retain(|r| r.id != id);
        Ok(store.records.len() != before)
    }
}
