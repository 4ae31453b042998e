//! Scoring pipeline: ticker check, provider lookups, completion, parse.
//!
//! Each stage returns its own `Result`; [`score_company`] folds them into one
//! [`ScoreError`] variant per terminal outcome so the HTTP layer only has to
//! pick a status code.

use crate::domain::company::CompanyInfo;
use crate::domain::score::ScoredResponse;
use crate::domain::ticker::{Ticker, TickerError};
use crate::ingest::provider::DataProviderClient;
use crate::llm::json::parse_disruptor_score;
use crate::llm::prompt::build_prompt;
use crate::llm::LlmClient;
use anyhow::Context;
use std::fmt;

#[derive(Debug)]
pub enum ScoreError {
    InvalidFormat,
    NotFound,
    Internal(anyhow::Error),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InvalidFormat => fmt::Display::fmt(&TickerError::InvalidFormat, f),
            ScoreError::NotFound => fmt::Display::fmt(&TickerError::NotFound, f),
            ScoreError::Internal(err) => write!(f, "{err:#}"),
        }
    }
}

impl std::error::Error for ScoreError {}

impl From<TickerError> for ScoreError {
    fn from(err: TickerError) -> Self {
        match err {
            TickerError::InvalidFormat => ScoreError::InvalidFormat,
            TickerError::NotFound => ScoreError::NotFound,
        }
    }
}

impl From<anyhow::Error> for ScoreError {
    fn from(err: anyhow::Error) -> Self {
        ScoreError::Internal(err)
    }
}

/// Live existence check. Any provider failure counts as "not found".
pub async fn ensure_listed(
    provider: &dyn DataProviderClient,
    ticker: &Ticker,
) -> Result<(), TickerError> {
    match provider.fetch_company_profile(ticker).await {
        Ok(profile) if profile.listed_name().is_some() => Ok(()),
        Ok(_) => {
            tracing::warn!(%ticker, provider = provider.provider_name(), "ticker has no company name");
            Err(TickerError::NotFound)
        }
        Err(err) => {
            tracing::warn!(
                %ticker,
                provider = provider.provider_name(),
                error = %format!("{err:#}"),
                "ticker lookup failed; treating as not found"
            );
            Err(TickerError::NotFound)
        }
    }
}

pub async fn fetch_company_info(
    provider: &dyn DataProviderClient,
    ticker: &Ticker,
) -> anyhow::Result<CompanyInfo> {
    let profile = provider
        .fetch_company_profile(ticker)
        .await
        .with_context(|| format!("failed to fetch company info for {ticker}"))?;
    Ok(CompanyInfo::from(profile))
}

pub async fn score_company(
    provider: &dyn DataProviderClient,
    llm: &dyn LlmClient,
    raw_ticker: &str,
) -> Result<ScoredResponse, ScoreError> {
    let ticker = Ticker::parse(raw_ticker)?;
    ensure_listed(provider, &ticker).await?;

    let info = fetch_company_info(provider, &ticker).await?;
    tracing::debug!(%ticker, name = %info.name, "company info fetched");

    let prompt = build_prompt(&ticker, &info);
    let completion = llm.complete(&prompt).await?;
    let score = parse_disruptor_score(llm.provider(), &completion).map_err(anyhow::Error::from)?;

    tracing::info!(
        %ticker,
        risk_score = score.risk_score.get(),
        opportunity_score = score.opportunity_score.get(),
        "company scored"
    );

    Ok(ScoredResponse { ticker, score })
}
