use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use clap::ValueEnum;
use tracing::info;
use wq_core::{Error, QuizStorage, Result};

pub mod backends;

pub use backends::*;

pub const DEFAULT_DB_PATH: &str = "quiz_history.db";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    /// Lost when the process exits
    #[default]
    Memory,
    /// SQLite database file (needs the `sqlite` feature)
    Sqlite,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StorageKind::Memory),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => Err(Error::Config(format!("Unknown storage backend: {}", other))),
        }
    }
}

/// Opens the requested backend. `db_path` only matters for SQLite and defaults to
/// [`DEFAULT_DB_PATH`].
pub async fn create_storage(kind: StorageKind, db_path: Option<&Path>) -> Result<Arc<dyn QuizStorage>> {
    match kind {
        StorageKind::Memory => {
            info!("Using in-memory quiz storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageKind::Sqlite => {
            let path = db_path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
            open_sqlite(&path).await
        }
    }
}

#[cfg(feature = "sqlite")]
async fn open_sqlite(path: &Path) -> Result<Arc<dyn QuizStorage>> {
    info!("Using SQLite quiz storage at {}", path.display());
    Ok(Arc::new(SQLiteStorage::new_with_path(path).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn open_sqlite(_path: &Path) -> Result<Arc<dyn QuizStorage>> {
    Err(Error::Config(
        "SQLite storage is not available: build with the `sqlite` feature".to_string(),
    ))
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageKind};
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_kind_parsing() {
        assert_eq!("sqlite".parse::<StorageKind>().unwrap(), StorageKind::Sqlite);
        assert_eq!("Memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert!("redis".parse::<StorageKind>().is_err());
    }

    #[tokio::test]
    async fn test_create_memory_storage() {
        let storage = create_storage(StorageKind::Memory, None).await.unwrap();
        let (items, total) = storage.list(0, 10).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 0);
    }
}
