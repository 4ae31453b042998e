use crate::domain::company::CompanyProfile;
use anyhow::bail;
use serde::Deserialize;

/// `GET /v10/finance/quoteSummary/{ticker}` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryEnvelope {
    pub quote_summary: QuoteSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<QuoteSummaryError>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    #[serde(default)]
    pub price: Option<PriceModule>,
    #[serde(default)]
    pub asset_profile: Option<AssetProfileModule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub market_cap: Option<FormattedValue>,
}

/// Yahoo wraps numbers as `{"raw": 123, "fmt": "123"}`; either key may be
/// missing and the object itself may be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattedValue {
    #[serde(default)]
    pub raw: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProfileModule {
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub long_business_summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl QuoteSummaryEnvelope {
    pub fn into_profile(self) -> anyhow::Result<CompanyProfile> {
        if let Some(err) = self.quote_summary.error {
            bail!("quoteSummary error {}: {}", err.code, err.description);
        }

        let Some(result) = self
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
        else {
            bail!("quoteSummary returned no result");
        };

        let price = result.price;
        let profile = result.asset_profile;

        let market_cap = price
            .as_ref()
            .and_then(|p| p.market_cap.as_ref())
            .and_then(|v| v.raw)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64);

        Ok(CompanyProfile {
            long_name: price.and_then(|p| p.long_name),
            sector: profile.as_ref().and_then(|p| p.sector.clone()),
            industry: profile.as_ref().and_then(|p| p.industry.clone()),
            market_cap,
            long_business_summary: profile.and_then(|p| p.long_business_summary),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_price_and_asset_profile() {
        let v = json!({
            "quoteSummary": {
                "result": [{
                    "price": {
                        "longName": "Apple Inc.",
                        "marketCap": {"raw": 3.4e12, "fmt": "3.4T", "longFmt": "3,400,000,000,000"},
                    },
                    "assetProfile": {
                        "sector": "Technology",
                        "industry": "Consumer Electronics",
                        "longBusinessSummary": "Apple Inc. designs smartphones.",
                        "fullTimeEmployees": 150000,
                    }
                }],
                "error": null
            }
        });

        let profile = serde_json::from_value::<QuoteSummaryEnvelope>(v)
            .unwrap()
            .into_profile()
            .unwrap();
        assert_eq!(profile.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(profile.sector.as_deref(), Some("Technology"));
        assert_eq!(profile.industry.as_deref(), Some("Consumer Electronics"));
        assert_eq!(profile.market_cap, Some(3_400_000_000_000));
        assert_eq!(
            profile.long_business_summary.as_deref(),
            Some("Apple Inc. designs smartphones.")
        );
    }

    #[test]
    fn tolerates_missing_modules_and_empty_market_cap() {
        let v = json!({
            "quoteSummary": {
                "result": [{"price": {"marketCap": {}}}],
                "error": null
            }
        });

        let profile = serde_json::from_value::<QuoteSummaryEnvelope>(v)
            .unwrap()
            .into_profile()
            .unwrap();
        assert_eq!(profile, CompanyProfile::default());
    }

    #[test]
    fn surfaces_provider_error() {
        let v = json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}
            }
        });

        let err = serde_json::from_value::<QuoteSummaryEnvelope>(v)
            .unwrap()
            .into_profile()
            .unwrap_err();
        assert!(err.to_string().contains("Quote not found for symbol: ZZZZ"));
    }
}
