use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use clap::ValueEnum;
use tracing::info;
use wq_core::{Error, InferenceModel, Result};

use crate::Config;

pub mod dummy;
pub mod groq;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;

pub use dummy::DummyModel;
pub use groq::GroqModel;
#[cfg(any(test, feature = "test-util"))]
pub use scripted::{ScriptedModel, ScriptedReply};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ModelKind {
    /// Groq-hosted chat completions (needs GROQ_API_KEY)
    #[default]
    Groq,
    /// Offline model producing canned quizzes
    Dummy,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Groq => write!(f, "groq"),
            ModelKind::Dummy => write!(f, "dummy"),
        }
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(ModelKind::Groq),
            "dummy" => Ok(ModelKind::Dummy),
            other => Err(Error::Config(format!("Unknown model backend: {}", other))),
        }
    }
}

pub fn create_model(kind: ModelKind, config: &Config) -> Result<Arc<dyn InferenceModel>> {
    let model: Arc<dyn InferenceModel> = match kind {
        ModelKind::Groq => Arc::new(GroqModel::new(config)?),
        ModelKind::Dummy => Arc::new(DummyModel::new()),
    };
    info!("Using {} inference model", model.name());
    Ok(model)
}
