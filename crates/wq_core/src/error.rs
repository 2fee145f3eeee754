use thiserror::Error;

/// Longest slice of model output carried inside a [`Error::Parse`].
pub const EXCERPT_CHARS: usize = 500;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Could not parse JSON from response: {excerpt}")]
    Parse { excerpt: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification used by callers deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something we refuse to work on.
    BadInput,
    /// The source site or the generation backend let us down.
    Upstream,
    Internal,
}

impl Error {
    pub fn fetch(url: &str, message: impl std::fmt::Display) -> Self {
        Error::Fetch {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// Builds a parse failure that keeps only the head of the offending text.
    pub fn parse(raw: &str) -> Self {
        Error::Parse {
            excerpt: excerpt(raw, EXCERPT_CHARS),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) | Error::NotFound(_) => ErrorKind::BadInput,
            Error::Fetch { .. } | Error::Generation(_) | Error::Parse { .. } => ErrorKind::Upstream,
            Error::AlreadyExists(_)
            | Error::Storage(_)
            | Error::Serialization(_)
            | Error::Config(_) => ErrorKind::Internal,
        }
    }
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
