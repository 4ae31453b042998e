use serde::Serialize;
use std::fmt;
use unicode_general_category::{get_general_category, GeneralCategory};

const MAX_TICKER_LEN: usize = 5;

/// Normalized ticker symbol: uppercased, trimmed, 1..=5 alphabetic characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ticker(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerError {
    InvalidFormat,
    NotFound,
}

impl fmt::Display for TickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickerError::InvalidFormat => f.write_str("Invalid ticker format"),
            TickerError::NotFound => f.write_str("Ticker not found"),
        }
    }
}

impl std::error::Error for TickerError {}

impl Ticker {
    /// Format check only. Existence is checked against the data provider by
    /// [`crate::pipeline::ensure_listed`].
    pub fn parse(raw: &str) -> Result<Self, TickerError> {
        // Uppercase first: some letters expand (e.g. "ß" -> "SS") and the
        // length limit applies to the uppercased form.
        let upper = raw.to_uppercase();
        let normalized = upper.trim();

        let len = normalized.chars().count();
        if len == 0 || len > MAX_TICKER_LEN {
            return Err(TickerError::InvalidFormat);
        }
        if !normalized.chars().all(is_letter) {
            return Err(TickerError::InvalidFormat);
        }

        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

/// Letter categories only (Lu, Ll, Lt, Lm, Lo). Narrower than
/// `char::is_alphabetic`, which also admits letter numbers and vowel signs.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let ticker = Ticker::parse("aapl ").unwrap();
        assert_eq!(ticker.as_str(), "AAPL");

        let ticker = Ticker::parse("\t msft\n").unwrap();
        assert_eq!(ticker.as_str(), "MSFT");
    }

    #[test]
    fn rejects_digits_and_punctuation() {
        for raw in ["1234", "AB1", "BRK.B", "BRK-B", "A B", "$TSLA"] {
            assert_eq!(Ticker::parse(raw), Err(TickerError::InvalidFormat), "{raw}");
        }
    }

    #[test]
    fn rejects_alphabetic_non_letters() {
        // Roman numeral twelve (Nl) and KA + vowel sign I (Lo + Mc).
        assert_eq!(Ticker::parse("Ⅻ"), Err(TickerError::InvalidFormat));
        assert_eq!(Ticker::parse("कि"), Err(TickerError::InvalidFormat));
    }

    #[test]
    fn accepts_non_ascii_letters() {
        assert_eq!(Ticker::parse("é").unwrap().as_str(), "É");
        assert!(Ticker::parse("क").is_ok());
    }

    #[test]
    fn rejects_more_than_five_characters() {
        assert_eq!(Ticker::parse("ZZZZZZ"), Err(TickerError::InvalidFormat));
        assert!(Ticker::parse("ZZZZZ").is_ok());
    }

    #[test]
    fn rejects_empty_and_blank_input() {
        assert_eq!(Ticker::parse(""), Err(TickerError::InvalidFormat));
        assert_eq!(Ticker::parse("   "), Err(TickerError::InvalidFormat));
    }

    #[test]
    fn length_is_checked_after_uppercasing() {
        // "straß" uppercases to "STRASS" (6 chars).
        assert_eq!(Ticker::parse("straß"), Err(TickerError::InvalidFormat));
    }

    #[test]
    fn error_messages_match_api_details() {
        assert_eq!(TickerError::InvalidFormat.to_string(), "Invalid ticker format");
        assert_eq!(TickerError::NotFound.to_string(), "Ticker not found");
    }
}
