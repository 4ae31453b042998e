pub mod domain;
pub mod ingest;
pub mod llm;
pub mod pipeline;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub groq_api_key: Option<String>,
        pub groq_base_url: Option<String>,
        pub sentry_dsn: Option<String>,
        pub data_provider_base_url: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                groq_api_key: non_empty_var("GROQ_API_KEY"),
                groq_base_url: non_empty_var("GROQ_BASE_URL"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
                data_provider_base_url: non_empty_var("DATA_PROVIDER_BASE_URL"),
            })
        }

        pub fn require_groq_api_key(&self) -> anyhow::Result<&str> {
            self.groq_api_key
                .as_deref()
                .context("GROQ_API_KEY is required")
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn missing_groq_key_is_reported_by_name() {
            let settings = Settings {
                groq_api_key: None,
                groq_base_url: None,
                sentry_dsn: None,
                data_provider_base_url: None,
            };
            let err = settings.require_groq_api_key().unwrap_err();
            assert_eq!(err.to_string(), "GROQ_API_KEY is required");
        }
    }
}
