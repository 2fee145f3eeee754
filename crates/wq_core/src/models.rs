use async_trait::async_trait;
use std::fmt;

use crate::Result;

/// A chat-style text generation backend.
#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Sends a single rendered prompt and returns the raw text of the reply.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
