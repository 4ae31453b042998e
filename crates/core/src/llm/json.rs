use crate::domain::contract::LlmDisruptorScore;
use crate::domain::score::DisruptorScore;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::Provider;

pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        // Remove Markdown fences (```json ... ``` or ``` ... ```).
        let mut inner = trimmed;
        if let Some(after_first) = inner.split_once('\n').map(|(_, rest)| rest) {
            inner = after_first;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    // Best-effort extraction: first '{' to last '}'.
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}

/// Parse raw completion text into a validated [`DisruptorScore`].
///
/// Any failure (no JSON, missing keys, scores outside 1..=5) is reported as
/// a schema violation carrying the raw text.
pub fn parse_disruptor_score(
    provider: Provider,
    text: &str,
) -> Result<DisruptorScore, LlmDiagnosticsError> {
    let json_str = extract_json(text).unwrap_or_else(|| text.trim().to_string());

    let parsed = serde_json::from_str::<LlmDisruptorScore>(&json_str).map_err(|err| {
        LlmDiagnosticsError::schema_violation(
            provider,
            format!("failed to parse DisruptorScore from completion {json_str}: {err}"),
            text,
        )
    })?;

    parsed.validate_and_into_score().map_err(|err| {
        LlmDiagnosticsError::schema_violation(
            provider,
            format!("invalid DisruptorScore in completion {json_str}: {err:#}"),
            text,
        )
    })
}
