use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;
use crate::narrative::{NarrativeGateway, NarrativeService};
use crate::news::{NewsGateway, NewsService};
use crate::portfolio::{PortfolioImporter, PortfolioSummary};
use crate::scoring::{
    BaselineRow, BenchmarkComparison, Industry, OnboardingData, ScoreReport, ScoringEngine,
};

/// Everything the estimator endpoints read from. Shared immutably across requests.
pub struct EstimatorState<N, M> {
    pub engine: Arc<ScoringEngine>,
    pub news: NewsService<N>,
    pub narrative: NarrativeService<M>,
}

/// Router exposing scoring, baselines, portfolio import, news and the narrative audit.
pub fn estimator_router<N, M>(state: Arc<EstimatorState<N, M>>) -> Router
where
    N: NewsGateway + 'static,
    M: NarrativeGateway + 'static,
{
    Router::new()
        .route("/api/v1/score", post(score_handler::<N, M>))
        .route("/api/v1/benchmark", post(benchmark_handler::<N, M>))
        .route("/api/v1/baselines", get(baselines_handler::<N, M>))
        .route(
            "/api/v1/baselines/:industry",
            get(baseline_handler::<N, M>),
        )
        .route("/api/v1/portfolio", post(portfolio_handler::<N, M>))
        .route("/api/v1/audit", post(audit_handler::<N, M>))
        .route("/api/news", get(news_handler::<N, M>))
        .with_state(state)
}

pub(crate) async fn score_handler<N, M>(
    State(state): State<Arc<EstimatorState<N, M>>>,
    Json(data): Json<OnboardingData>,
) -> Json<ScoreReport>
where
    N: NewsGateway + 'static,
    M: NarrativeGateway + 'static,
{
    Json(state.engine.report(&data))
}

pub(crate) async fn benchmark_handler<N, M>(
    State(state): State<Arc<EstimatorState<N, M>>>,
    Json(data): Json<OnboardingData>,
) -> Json<BenchmarkComparison>
where
    N: NewsGateway + 'static,
    M: NarrativeGateway + 'static,
{
    Json(state.engine.baselines().benchmark(&data))
}

pub(crate) async fn baselines_handler<N, M>(
    State(state): State<Arc<EstimatorState<N, M>>>,
) -> Json<Vec<BaselineRow>>
where
    N: NewsGateway + 'static,
    M: NarrativeGateway + 'static,
{
    Json(state.engine.baselines().rows())
}

pub(crate) async fn baseline_handler<N, M>(
    State(state): State<Arc<EstimatorState<N, M>>>,
    Path(industry): Path<String>,
) -> Response
where
    N: NewsGateway + 'static,
    M: NarrativeGateway + 'static,
{
    match Industry::parse_label(&industry) {
        Some(industry) => {
            let row = BaselineRow {
                industry,
                baseline: state.engine.baselines().baseline(industry),
            };
            (StatusCode::OK, Json(row)).into_response()
        }
        None => {
            let payload = json!({
                "error": format!("unknown industry '{industry}'"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

/// Scores a CSV export sent as the request body.
pub(crate) async fn portfolio_handler<N, M>(
    State(state): State<Arc<EstimatorState<N, M>>>,
    body: String,
) -> Result<Json<PortfolioSummary>, AppError>
where
    N: NewsGateway + 'static,
    M: NarrativeGateway + 'static,
{
    let summary = PortfolioImporter::from_reader(body.as_bytes(), &state.engine)?;
    Ok(Json(summary))
}

pub(crate) async fn news_handler<N, M>(State(state): State<Arc<EstimatorState<N, M>>>) -> Response
where
    N: NewsGateway + 'static,
    M: NarrativeGateway + 'static,
{
    let feed = state.news.feed().await;
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(feed),
    )
        .into_response()
}

#[derive(Debug, Serialize)]
pub(crate) struct AuditResponse {
    narrative: String,
}

pub(crate) async fn audit_handler<N, M>(
    State(state): State<Arc<EstimatorState<N, M>>>,
    Json(data): Json<OnboardingData>,
) -> Json<AuditResponse>
where
    N: NewsGateway + 'static,
    M: NarrativeGateway + 'static,
{
    let narrative = state.narrative.audit(&data).await;
    Json(AuditResponse { narrative })
}
