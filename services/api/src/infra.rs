use esg_estimator::config::{AppConfig, NarrativeConfig, NewsConfig};
use esg_estimator::narrative::{GeminiClient, NarrativeService};
use esg_estimator::news::{GNewsClient, NewsCache, NewsService};
use esg_estimator::scoring::{
    BaselineTables, BusinessSize, FleetType, Industry, Location, ScoringEngine,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_engine(config: &AppConfig) -> Arc<ScoringEngine> {
    Arc::new(ScoringEngine::new(
        BaselineTables::standard(),
        config.scoring.clone(),
    ))
}

/// Live feed when a key is configured, static headlines otherwise.
pub(crate) fn build_news_service(config: &NewsConfig) -> NewsService<GNewsClient> {
    let Some(api_key) = config.api_key.as_deref() else {
        return NewsService::offline();
    };

    match GNewsClient::new(
        config.base_url.as_str(),
        api_key,
        config.query.clone(),
        config.request_timeout,
    ) {
        Ok(client) => NewsService::live(NewsCache::new(client, config.cache_ttl)),
        Err(err) => {
            warn!(error = %err, "news client unavailable, serving static headlines");
            NewsService::offline()
        }
    }
}

pub(crate) fn build_narrative_service(config: &NarrativeConfig) -> NarrativeService<GeminiClient> {
    let Some(api_key) = config.api_key.as_deref() else {
        return NarrativeService::disabled();
    };

    match GeminiClient::new(
        config.base_url.as_str(),
        api_key,
        config.model.as_str(),
        config.request_timeout,
    ) {
        Ok(client) => NarrativeService::new(client),
        Err(err) => {
            warn!(error = %err, "narrative client unavailable, audits disabled");
            NarrativeService::disabled()
        }
    }
}

pub(crate) fn parse_industry(raw: &str) -> Result<Industry, String> {
    Industry::parse_label(raw)
        .ok_or_else(|| unknown_value("industry", raw, Industry::ALL.map(Industry::label)))
}

pub(crate) fn parse_size(raw: &str) -> Result<BusinessSize, String> {
    BusinessSize::parse_label(raw).ok_or_else(|| {
        unknown_value("company size", raw, BusinessSize::ALL.map(BusinessSize::label))
    })
}

pub(crate) fn parse_location(raw: &str) -> Result<Location, String> {
    Location::parse_label(raw)
        .ok_or_else(|| unknown_value("location", raw, Location::ALL.map(Location::label)))
}

pub(crate) fn parse_fleet(raw: &str) -> Result<FleetType, String> {
    FleetType::parse_label(raw)
        .ok_or_else(|| unknown_value("fleet type", raw, FleetType::ALL.map(FleetType::label)))
}

fn unknown_value<const N: usize>(kind: &str, raw: &str, labels: [&str; N]) -> String {
    format!("unknown {kind} '{raw}' (expected one of: {})", labels.join(", "))
}
