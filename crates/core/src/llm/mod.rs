pub mod error;
pub mod groq;
pub mod json;
pub mod prompt;

use crate::llm::prompt::ChatPrompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    /// Single round trip; returns the raw completion text.
    async fn complete(&self, prompt: &ChatPrompt) -> anyhow::Result<String>;
}
