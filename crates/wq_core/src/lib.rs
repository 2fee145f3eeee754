pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, ErrorKind};
pub use models::InferenceModel;
pub use storage::QuizStorage;
pub use types::{
    ArticleRecord, Difficulty, KeyEntities, QuizHistory, QuizListItem, QuizQuestion, QuizResponse,
    QuizResult, StoredQuiz,
};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::{ArticleRecord, Error, InferenceModel, QuizQuestion, QuizResult, Result};
}
