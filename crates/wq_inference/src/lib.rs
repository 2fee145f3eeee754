use std::env;
use std::time::Duration;

use wq_core::{Error, Result};

pub mod models;
pub mod parse;
pub mod prompts;
pub mod truncate;
pub mod validate;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL_NAME: &str = "llama-3.1-8b-instant";

/// Settings for the hosted text generation backend.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: 0.3,
            max_tokens: 4096,
            timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// Reads `GROQ_API_KEY`, `WQ_MODEL`, `WQ_MODEL_URL` and `WQ_MODEL_TIMEOUT_SECS`, falling back
    /// to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        config.api_key = non_empty("GROQ_API_KEY");
        if let Some(model) = non_empty("WQ_MODEL") {
            config.model_name = model;
        }
        if let Some(url) = non_empty("WQ_MODEL_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = non_empty("WQ_MODEL_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("WQ_MODEL_TIMEOUT_SECS must be a number of seconds, got {secs:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

pub use models::{create_model, DummyModel, GroqModel, ModelKind};
#[cfg(any(test, feature = "test-util"))]
pub use models::{ScriptedModel, ScriptedReply};
pub use parse::parse_json_response;
pub use prompts::{quiz_prompt, related_topics_prompt};
pub use truncate::{truncate_content, DEFAULT_MAX_CHARS, TRUNCATION_MARKER};
pub use validate::{validate_quiz, validate_topics, ValidationPolicy};

pub mod prelude {
    pub use super::models::create_model;
    pub use super::Config;
    pub use wq_core::{Error, InferenceModel, Result};
}
