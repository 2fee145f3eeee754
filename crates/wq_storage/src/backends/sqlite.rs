use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use tracing::debug;
use wq_core::{Error, QuizResult, QuizStorage, Result, StoredQuiz};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS quizzes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        created_at TEXT NOT NULL,
        result TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_quizzes_created_at ON quizzes (created_at)",
];

fn storage_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> Error {
    move |e| Error::Storage(format!("{}: {}", context, e))
}

/// One row per quiz; the full [`QuizResult`] is kept as JSON next to a few indexed columns.
pub struct SQLiteStorage {
    pool: SqlitePool,
    db_path: PathBuf,
}

impl std::fmt::Debug for SQLiteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SQLiteStorage")
            .field("db_path", &self.db_path)
            .finish()
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create database directory: {}", e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(storage_error("Failed to connect to database"))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }
        debug!("Opened quiz database at {}", db_path.display());

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

fn decode(row: &SqliteRow) -> Result<StoredQuiz> {
    let id: i64 = row.try_get("id").map_err(storage_error("Failed to read id"))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(storage_error("Failed to read created_at"))?;
    let result: String = row
        .try_get("result")
        .map_err(storage_error("Failed to read quiz"))?;

    Ok(StoredQuiz {
        id,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| Error::Storage(format!("Failed to parse date: {}", e)))?
            .with_timezone(&Utc),
        result: serde_json::from_str(&result)?,
    })
}

#[async_trait]
impl QuizStorage for SQLiteStorage {
    async fn insert(&self, result: &QuizResult) -> Result<StoredQuiz> {
        let url = &result.article.url;
        // Stored with microsecond precision, so keep the in-memory copy identical to a re-read.
        let created_at = Utc::now().trunc_subsecs(6);
        let payload = serde_json::to_string(result)?;

        let outcome = sqlx::query(
            r#"
            INSERT INTO quizzes (url, title, created_at, result)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(url)
        .bind(&result.article.title)
        .bind(created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(payload)
        .execute(&self.pool)
        .await;

        let done = match outcome {
            Ok(done) => done,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(Error::AlreadyExists(format!("Quiz for {}", url)));
            }
            Err(e) => return Err(storage_error("Failed to store quiz")(e)),
        };

        Ok(StoredQuiz {
            id: done.last_insert_rowid(),
            created_at,
            result: result.clone(),
        })
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<StoredQuiz>> {
        let row = sqlx::query("SELECT id, created_at, result FROM quizzes WHERE url = ?")
            .bind(url)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to look up quiz by URL"))?;
        row.as_ref().map(decode).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StoredQuiz>> {
        let row = sqlx::query("SELECT id, created_at, result FROM quizzes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("Failed to look up quiz by id"))?;
        row.as_ref().map(decode).transpose()
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<(Vec<StoredQuiz>, usize)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quizzes")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("Failed to count quizzes"))?;

        let rows = sqlx::query(
            r#"
            SELECT id, created_at, result FROM quizzes
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(skip).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("Failed to list quizzes"))?;

        let quizzes = rows.iter().map(decode).collect::<Result<Vec<_>>>()?;
        Ok((quizzes, usize::try_from(total).unwrap_or_default()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let done = sqlx::query("DELETE FROM quizzes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error("Failed to delete quiz"))?;
        Ok(done.rows_affected() > 0)
    }
}
