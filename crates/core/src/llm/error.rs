use crate::llm::Provider;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone)]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    pub stage: &'static str,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}

impl LlmDiagnosticsError {
    /// Completion text that did not fit the disruptor score schema.
    pub fn schema_violation(provider: Provider, detail: String, raw_output: &str) -> Self {
        Self {
            provider,
            stage: "parse",
            detail,
            raw_output: Some(raw_output.to_string()),
            raw_response_json: None,
        }
    }

    pub fn is_schema_violation(&self) -> bool {
        self.stage == "parse"
    }
}

impl fmt::Display for LlmDiagnosticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LLM error (provider={:?}, stage={}): {}",
            self.provider, self.stage, self.detail
        )
    }
}

impl std::error::Error for LlmDiagnosticsError {}
