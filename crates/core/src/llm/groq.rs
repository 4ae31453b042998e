use crate::config::Settings;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::prompt::{ChatMessage, ChatPrompt};
use crate::llm::{LlmClient, Provider};
use anyhow::Context;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
pub const MODEL: &str = "llama-3.1-8b-instant";
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_groq_api_key()?.to_string();
        let base_url = settings
            .groq_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let http = reqwest::Client::builder()
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    fn request<'a>(prompt: &'a ChatPrompt) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            messages: &prompt.messages,
        }
    }

    async fn create_completion(
        &self,
        req: &ChatCompletionRequest<'_>,
    ) -> anyhow::Result<ChatCompletionResponse> {
        let res = self
            .http
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(req)
            .send()
            .await
            .context("Groq request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Groq response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(LlmDiagnosticsError {
                provider: Provider::Groq,
                stage: "http",
                detail: format!("status={status}: {text}"),
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        serde_json::from_str::<ChatCompletionResponse>(&text).map_err(|err| {
            anyhow::Error::from(LlmDiagnosticsError {
                provider: Provider::Groq,
                stage: "decode",
                detail: format!("failed to decode chat completion response: {err}"),
                raw_output: Some(text.clone()),
                raw_response_json: serde_json::from_str(&text).ok(),
            })
        })
    }

    fn response_text(res: ChatCompletionResponse) -> anyhow::Result<String> {
        let choice = res
            .choices
            .into_iter()
            .next()
            .context("Groq response contained no choices")?;
        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl LlmClient for GroqClient {
    fn provider(&self) -> Provider {
        Provider::Groq
    }

    async fn complete(&self, prompt: &ChatPrompt) -> anyhow::Result<String> {
        let res = self.create_completion(&Self::request(prompt)).await?;
        if let Some(usage) = &res.usage {
            tracing::debug!(
                model = MODEL,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Groq completion received"
            );
        }
        Self::response_text(res)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'static str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,

    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}
