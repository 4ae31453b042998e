use crate::domain::score::{DisruptorScore, Score};
use anyhow::{bail, ensure};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shape the model is asked to emit. Scores stay untyped until validated so
/// that near-misses ("4", 4.0) can be coerced and real violations reported
/// with the offending value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmDisruptorScore {
    pub summary: String,
    pub risk_score: Value,
    pub opportunity_score: Value,
}

impl LlmDisruptorScore {
    pub fn validate_and_into_score(self) -> anyhow::Result<DisruptorScore> {
        let risk_score = coerce_score("risk_score", &self.risk_score)?;
        let opportunity_score = coerce_score("opportunity_score", &self.opportunity_score)?;

        Ok(DisruptorScore {
            summary: self.summary,
            risk_score,
            opportunity_score,
        })
    }
}

fn coerce_score(field: &str, value: &Value) -> anyhow::Result<Score> {
    let n = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                ensure!(
                    f.fract() == 0.0 && f.is_finite(),
                    "{field} must be an integer (got {n})"
                );
                f as i64
            }
        }
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => i,
            Err(_) => bail!("{field} must be an integer (got {s:?})"),
        },
        other => bail!("{field} must be an integer (got {other})"),
    };

    Score::new(n).ok_or_else(|| anyhow::anyhow!("{field} must be one of 1, 2, 3, 4, 5 (got {n})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contract(risk: Value, opportunity: Value) -> LlmDisruptorScore {
        LlmDisruptorScore {
            summary: "s".to_string(),
            risk_score: risk,
            opportunity_score: opportunity,
        }
    }

    #[test]
    fn accepts_integers_in_range() {
        let score = contract(json!(1), json!(5)).validate_and_into_score().unwrap();
        assert_eq!(score.risk_score.get(), 1);
        assert_eq!(score.opportunity_score.get(), 5);
    }

    #[test]
    fn coerces_integral_floats_and_numeric_strings() {
        let score = contract(json!(3.0), json!("4")).validate_and_into_score().unwrap();
        assert_eq!(score.risk_score.get(), 3);
        assert_eq!(score.opportunity_score.get(), 4);
    }

    #[test]
    fn rejects_out_of_range() {
        let err = contract(json!(0), json!(3)).validate_and_into_score().unwrap_err();
        assert!(err.to_string().contains("risk_score"));

        let err = contract(json!(2), json!(6)).validate_and_into_score().unwrap_err();
        assert!(err.to_string().contains("opportunity_score"));
    }

    #[test]
    fn rejects_non_integers() {
        for bad in [json!(3.5), json!("high"), json!(null), json!(true), json!([3])] {
            assert!(
                contract(bad.clone(), json!(3)).validate_and_into_score().is_err(),
                "{bad}"
            );
        }
    }
}
