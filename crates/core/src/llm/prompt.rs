use crate::domain::company::CompanyInfo;
use crate::domain::ticker::Ticker;
use serde::Serialize;

const SYSTEM_PROMPT: &str = "You are a financial analyst and expert in disruptive companies.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub messages: Vec<ChatMessage>,
}

pub fn build_prompt(ticker: &Ticker, info: &CompanyInfo) -> ChatPrompt {
    ChatPrompt {
        messages: vec![
            ChatMessage {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: Role::User,
                content: user_prompt(ticker, info),
            },
        ],
    }
}

fn user_prompt(ticker: &Ticker, info: &CompanyInfo) -> String {
    format!(
        "Here is some company info:\n\
Name: {}\n\
Sector: {}\n\
Industry: {}\n\
MarketCap: {}\n\
Summary: {}\n\n\
Based on this info, give me a simple 3-sentence summary of why {ticker} might be considered a disruptor. \
Respond in JSON with fields: summary, risk_score (1–5), opportunity_score (1–5).",
        info.name, info.sector, info.industry, info.market_cap, info.summary,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_two_turns_with_company_fields() {
        let ticker = Ticker::parse("nvda").unwrap();
        let info = CompanyInfo {
            name: "NVIDIA Corporation".to_string(),
            sector: "Technology".to_string(),
            industry: "Semiconductors".to_string(),
            market_cap: 4_000_000_000_000,
            summary: "Designs GPUs.".to_string(),
        };

        let prompt = build_prompt(&ticker, &info);
        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.messages[0].role, Role::System);
        assert_eq!(prompt.messages[0].content, SYSTEM_PROMPT);
        assert_eq!(prompt.messages[1].role, Role::User);

        let expected = "Here is some company info:\n\
Name: NVIDIA Corporation\n\
Sector: Technology\n\
Industry: Semiconductors\n\
MarketCap: 4000000000000\n\
Summary: Designs GPUs.\n\n\
Based on this info, give me a simple 3-sentence summary of why NVDA might be considered a disruptor. \
Respond in JSON with fields: summary, risk_score (1–5), opportunity_score (1–5).";
        assert_eq!(prompt.messages[1].content, expected);
    }

    #[test]
    fn defaulted_info_still_renders() {
        let ticker = Ticker::parse("ZZZ").unwrap();
        let prompt = build_prompt(&ticker, &CompanyInfo::default());
        assert!(prompt.messages[1].content.contains("MarketCap: 0\n"));
        assert!(prompt.messages[1].content.contains("Name: \n"));
    }
}
