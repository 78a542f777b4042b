//! HTTP endpoint server using Axum
//!
//! The JSON surface a presentation layer (tables, charts, sliders) drives.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::config::{AnalysisConfig, AppConfig};
use crate::core::runner::{AnalysisRunner, ChartReport};
use crate::error::SignalError;
use crate::services::yahoo::YahooMarketDataProvider;
use crate::signals::aggregation::AnalysisReport;

#[derive(Clone)]
pub struct AppState {
    pub start_time: Arc<Instant>,
    pub runner: Arc<AnalysisRunner>,
    pub concurrency: usize,
}

impl AppState {
    pub fn new(runner: Arc<AnalysisRunner>, concurrency: usize) -> Self {
        Self {
            start_time: Arc::new(Instant::now()),
            runner,
            concurrency: concurrency.max(1),
        }
    }
}

/// Status reported by `/health`; no upstream state is tracked.
const HEALTHY: &str = "healthy";

/// Rejected analysis request; rendered as `{"error": ...}`.
pub struct ApiError(SignalError);

impl From<SignalError> for ApiError {
    fn from(err: SignalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SignalError::InvalidParameter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(error = %self.0, status = %status, "Rejected analysis request");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": HEALTHY,
        "uptime_seconds": uptime_seconds,
        "service": "stockpicker-signal-engine"
    })))
}

/// Horizon analysis: BUY buckets, short-horizon SELLs, intersection, diagnostics.
async fn run_analysis(
    State(state): State<AppState>,
    Json(config): Json<AnalysisConfig>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let report = if state.concurrency > 1 {
        state.runner.run_concurrent(&config, state.concurrency).await?
    } else {
        state.runner.run(&config).await?
    };
    Ok(Json(report))
}

/// Chart mode: closes, volume, per-bar markers and optional MA overlays.
async fn run_chart(
    State(state): State<AppState>,
    Json(config): Json<AnalysisConfig>,
) -> Result<Json<ChartReport>, ApiError> {
    Ok(Json(state.runner.chart(&config).await?))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/analysis", post(run_analysis))
        .route("/api/chart", post(run_chart))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let provider = Arc::new(YahooMarketDataProvider::with_base_url(&config.yahoo_base_url));
    let runner = Arc::new(AnalysisRunner::new(provider).with_fetch_timeout(config.fetch_timeout));
    let state = AppState::new(runner, config.fetch_concurrency);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
