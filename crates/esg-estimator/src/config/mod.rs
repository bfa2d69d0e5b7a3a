use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::narrative::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::news::{NewsQuery, DEFAULT_CACHE_TTL, DEFAULT_GNEWS_BASE_URL};
use crate::scoring::{ScoringConfig, ScoringConfigError, ScoringWeights};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the estimator service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub news: NewsConfig,
    pub narrative: NarrativeConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Read the process environment, after loading `.env` if present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment =
            AppEnvironment::from_str(&var("APP_ENV").unwrap_or_else(|| "development".to_string()));

        let host = var("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = var("APP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = var("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let cache_ttl = match var("NEWS_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(parse_number("NEWS_CACHE_TTL_SECS", &raw)?),
            None => DEFAULT_CACHE_TTL,
        };
        let news = NewsConfig {
            api_key: var("GNEWS_API_KEY"),
            base_url: var("GNEWS_BASE_URL").unwrap_or_else(|| DEFAULT_GNEWS_BASE_URL.to_string()),
            cache_ttl,
            query: NewsQuery::default(),
            request_timeout: Duration::from_secs(10),
        };

        let narrative = NarrativeConfig {
            api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
            model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(60),
        };

        let defaults = ScoringWeights::default();
        let weights = ScoringWeights {
            energy: optional_number(&var, "ESG_WEIGHT_ENERGY")?.unwrap_or(defaults.energy),
            waste: optional_number(&var, "ESG_WEIGHT_WASTE")?.unwrap_or(defaults.waste),
            materials: optional_number(&var, "ESG_WEIGHT_MATERIALS")?
                .unwrap_or(defaults.materials),
        };
        let scoring = ScoringConfig::with_weights(weights);
        scoring.validate()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            news,
            narrative,
            scoring,
        })
    }
}

fn parse_number<T: FromStr>(variable: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            variable,
            value: raw.to_string(),
        })
}

fn optional_number<T, F>(var: &F, variable: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(variable)
        .map(|raw| parse_number(variable, &raw))
        .transpose()
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// News feed settings. Without an API key only the static headlines are served.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub cache_ttl: Duration,
    pub query: NewsQuery,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str, value: String },
    Scoring(ScoringConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable, value } => {
                write!(f, "{variable} must be a number, got '{value}'")
            }
            ConfigError::Scoring(err) => write!(f, "invalid scoring configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Scoring(err) => Some(err),
        }
    }
}

impl From<ScoringConfigError> for ConfigError {
    fn from(value: ScoringConfigError) -> Self {
        Self::Scoring(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let config = load_with(&[]).expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.news.api_key.is_none());
        assert_eq!(config.news.cache_ttl, Duration::from_secs(600));
        assert_eq!(config.narrative.model, "gemini-3-flash-preview");
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let config = load_with(&[("APP_HOST", "localhost")]).expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn reads_collaborator_keys() {
        let config = load_with(&[
            ("APP_ENV", "production"),
            ("GNEWS_API_KEY", "news-key"),
            ("NEWS_CACHE_TTL_SECS", "30"),
            ("API_KEY", "legacy-key"),
        ])
        .expect("config loads");

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.news.api_key.as_deref(), Some("news-key"));
        assert_eq!(config.news.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.narrative.api_key.as_deref(), Some("legacy-key"));
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let config = load_with(&[("GNEWS_API_KEY", "  ")]).expect("config loads");
        assert!(config.news.api_key.is_none());
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = load_with(&[("NEWS_CACHE_TTL_SECS", "ten")]).expect_err("bad ttl");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                variable: "NEWS_CACHE_TTL_SECS",
                ..
            }
        ));

        let err = load_with(&[("APP_PORT", "70000")]).expect_err("bad port");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn weight_overrides_are_validated() {
        let config = load_with(&[
            ("ESG_WEIGHT_ENERGY", "0.5"),
            ("ESG_WEIGHT_WASTE", "0.25"),
            ("ESG_WEIGHT_MATERIALS", "0.25"),
        ])
        .expect("weights sum to one");
        assert_eq!(config.scoring.weights.energy, 0.5);

        let err = load_with(&[("ESG_WEIGHT_ENERGY", "0.9")]).expect_err("sum exceeds one");
        assert!(matches!(
            err,
            ConfigError::Scoring(ScoringConfigError::WeightSum(_))
        ));
    }
}
