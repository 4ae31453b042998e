use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use disruptor_core::domain::score::ScoredResponse;
use disruptor_core::ingest::provider::{DataProviderClient, YahooFinanceProvider};
use disruptor_core::llm::groq::GroqClient;
use disruptor_core::llm::LlmClient;
use disruptor_core::pipeline::{self, ScoreError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = disruptor_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let llm = GroqClient::from_settings(&settings)?;
    let provider = YahooFinanceProvider::from_settings(&settings)?;

    let state = AppState {
        provider: Arc::new(provider),
        llm: Arc::new(llm),
    };

    let app = router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/score-company", post(score_company))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    provider: Arc<dyn DataProviderClient>,
    llm: Arc<dyn LlmClient>,
}

#[derive(Debug, Deserialize)]
struct TickerRequest {
    ticker: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug)]
enum ApiError {
    Score(ScoreError),
    InvalidBody(serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Score(ScoreError::InvalidFormat) => {
                (StatusCode::BAD_REQUEST, ScoreError::InvalidFormat.to_string())
            }
            ApiError::Score(ScoreError::NotFound) => {
                (StatusCode::NOT_FOUND, ScoreError::NotFound.to_string())
            }
            ApiError::Score(ScoreError::Internal(err)) => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %format!("{err:#}"), "scoring failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
            }
            ApiError::InvalidBody(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Failed to deserialize the JSON body into the target type: {err}"),
            ),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

async fn score_company(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ScoredResponse>, ApiError> {
    // Decoded by hand: the body is JSON whether or not the client sends a
    // Content-Type header.
    let req = serde_json::from_slice::<TickerRequest>(&body).map_err(ApiError::InvalidBody)?;

    let scored = pipeline::score_company(state.provider.as_ref(), state.llm.as_ref(), &req.ticker)
        .await
        .map_err(ApiError::Score)?;

    Ok(Json(scored))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &disruptor_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
