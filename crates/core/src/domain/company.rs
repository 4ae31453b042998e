/// Provider-side view of a listed company. Every field is optional because
/// the upstream payload omits whatever it does not know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyProfile {
    pub long_name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<u64>,
    pub long_business_summary: Option<String>,
}

impl CompanyProfile {
    /// Non-empty company name, if the provider knows one.
    pub fn listed_name(&self) -> Option<&str> {
        self.long_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Descriptive fields fed into the prompt. Missing data defaults to empty
/// strings and a zero market cap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyInfo {
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub market_cap: u64,
    pub summary: String,
}

impl From<CompanyProfile> for CompanyInfo {
    fn from(profile: CompanyProfile) -> Self {
        Self {
            name: profile.long_name.unwrap_or_default(),
            sector: profile.sector.unwrap_or_default(),
            industry: profile.industry.unwrap_or_default(),
            market_cap: profile.market_cap.unwrap_or(0),
            summary: profile.long_business_summary.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let info = CompanyInfo::from(CompanyProfile {
            long_name: Some("Apple Inc.".to_string()),
            ..Default::default()
        });
        assert_eq!(info.name, "Apple Inc.");
        assert_eq!(info.sector, "");
        assert_eq!(info.industry, "");
        assert_eq!(info.market_cap, 0);
        assert_eq!(info.summary, "");
    }

    #[test]
    fn empty_name_is_not_listed() {
        let profile = CompanyProfile {
            long_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(profile.listed_name(), None);
        assert_eq!(CompanyProfile::default().listed_name(), None);
    }
}
