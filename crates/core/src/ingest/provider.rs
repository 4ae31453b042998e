use crate::config::Settings;
use crate::domain::company::CompanyProfile;
use crate::domain::ticker::Ticker;
use crate::ingest::types::QuoteSummaryEnvelope;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_PATH: &str = "/v1/test/getcrumb";
const QUOTE_SUMMARY_PATH: &str = "/v10/finance/quoteSummary";
const QUOTE_SUMMARY_MODULES: &str = "price,assetProfile";

// Yahoo rejects requests without a browser-like user agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[async_trait::async_trait]
pub trait DataProviderClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_company_profile(&self, ticker: &Ticker) -> Result<CompanyProfile>;
}

#[derive(Debug)]
pub struct YahooFinanceProvider {
    http: reqwest::Client,
    base_url: String,
    cookie_url: String,

    // Session crumb, paired with the cookie held by `http`. Cleared when
    // Yahoo stops accepting it.
    crumb: tokio::sync::Mutex<Option<String>>,
}

impl YahooFinanceProvider {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings
            .data_provider_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .context("failed to build data provider http client")?;

        Ok(Self {
            http,
            base_url,
            cookie_url: COOKIE_URL.to_string(),
            crumb: tokio::sync::Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn crumb(&self) -> Result<String> {
        if let Some(crumb) = self.cached_crumb().await {
            return Ok(crumb);
        }

        // Fetched without holding the lock so a stalled Yahoo handshake only
        // stalls the request that started it.
        let crumb = self.fetch_crumb().await?;
        *self.crumb.lock().await = Some(crumb.clone());
        Ok(crumb)
    }

    async fn cached_crumb(&self) -> Option<String> {
        self.crumb.lock().await.clone()
    }

    async fn fetch_crumb(&self) -> Result<String> {
        // Only the Set-Cookie matters here; fc.yahoo.com answers 404.
        let _ = self
            .http
            .get(&self.cookie_url)
            .send()
            .await
            .context("failed to obtain Yahoo session cookie")?;

        let res = self
            .http
            .get(self.url(CRUMB_PATH))
            .send()
            .await
            .context("Yahoo crumb request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Yahoo crumb response")?;
        let crumb = text.trim();
        anyhow::ensure!(
            status.is_success() && !crumb.is_empty() && !crumb.contains('<'),
            "Yahoo crumb unavailable (HTTP {status})"
        );

        tracing::debug!("obtained Yahoo session crumb");
        Ok(crumb.to_string())
    }

    async fn invalidate_crumb(&self) {
        *self.crumb.lock().await = None;
    }
}

#[async_trait::async_trait]
impl DataProviderClient for YahooFinanceProvider {
    fn provider_name(&self) -> &'static str {
        "yahoo_finance"
    }

    async fn fetch_company_profile(&self, ticker: &Ticker) -> Result<CompanyProfile> {
        let crumb = self.crumb().await?;
        let url = self.url(&format!("{QUOTE_SUMMARY_PATH}/{ticker}"));

        let res = self
            .http
            .get(url)
            .query(&[("modules", QUOTE_SUMMARY_MODULES), ("crumb", crumb.as_str())])
            .send()
            .await
            .context("data provider request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read provider response")?;

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            self.invalidate_crumb().await;
            anyhow::bail!("data provider rejected session (HTTP {status}): {text}");
        }

        // Unknown symbols come back as 404 with a quoteSummary error body, so
        // decode before looking at the status.
        let envelope = serde_json::from_str::<QuoteSummaryEnvelope>(&text)
            .with_context(|| format!("provider response is not valid quoteSummary JSON (HTTP {status}): {text}"))?;
        let profile = envelope.into_profile()?;

        anyhow::ensure!(status.is_success(), "data provider HTTP {status}");
        Ok(profile)
    }
}
