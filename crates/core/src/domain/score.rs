use crate::domain::ticker::Ticker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rating on the closed scale 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
            .ok_or_else(|| format!("score must be between 1 and 5 (got {value})"))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptorScore {
    pub summary: String,
    pub risk_score: Score,
    pub opportunity_score: Score,
}

/// Wire response for `POST /score-company`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResponse {
    pub ticker: Ticker,
    #[serde(flatten)]
    pub score: DisruptorScore,
}
