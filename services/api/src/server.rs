use crate::cli::ServeArgs;
use crate::infra::{build_engine, build_narrative_service, build_news_service, AppState};
use crate::routes::with_estimator_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use esg_estimator::config::AppConfig;
use esg_estimator::error::AppError;
use esg_estimator::router::EstimatorState;
use esg_estimator::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let news = build_news_service(&config.news);
    let narrative = build_narrative_service(&config.narrative);
    info!(
        live_news = news.is_live(),
        narrative_enabled = narrative.is_enabled(),
        model = %config.narrative.model,
        "collaborators configured"
    );

    let estimator_state = Arc::new(EstimatorState {
        engine: build_engine(&config),
        news,
        narrative,
    });

    let app = with_estimator_routes(estimator_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "esg estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
