use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use super::domain::{ArticleSource, NewsArticle};
use super::{NewsError, NewsGateway};

pub const DEFAULT_GNEWS_BASE_URL: &str = "https://gnews.io/api/v4";
const FALLBACK_SOURCE_NAME: &str = "GNews";

/// Search parameters sent to the GNews search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub terms: String,
    pub language: String,
    pub max_articles: u8,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            terms: "sustainability business regulation".to_string(),
            language: "en".to_string(),
            max_articles: 3,
        }
    }
}

/// HTTP client for the GNews search API.
#[derive(Debug, Clone)]
pub struct GNewsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    query: NewsQuery,
}

impl GNewsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        query: NewsQuery,
        timeout: Duration,
    ) -> Result<Self, NewsError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| NewsError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            query,
        })
    }

    pub fn search_url(&self) -> Result<Url, NewsError> {
        let endpoint = format!("{}/search", self.base_url.trim_end_matches('/'));
        let max = self.query.max_articles.to_string();
        Url::parse_with_params(
            &endpoint,
            [
                ("q", self.query.terms.as_str()),
                ("lang", self.query.language.as_str()),
                ("max", max.as_str()),
                ("token", self.api_key.as_str()),
            ],
        )
        .map_err(|err| NewsError::InvalidUrl(err.to_string()))
    }
}

impl NewsGateway for GNewsClient {
    async fn fetch_articles(&self) -> Result<Vec<NewsArticle>, NewsError> {
        let url = self.search_url()?;
        debug!(host = url.host_str().unwrap_or_default(), "requesting news search");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| NewsError::Transport(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Status(status.as_u16()));
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|err| NewsError::Decode(err.without_url().to_string()))?;

        let articles = payload.articles.ok_or(NewsError::MissingArticles)?;
        Ok(normalize_articles(articles, Utc::now()))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Option<Vec<Option<RawArticle>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<RawSource>,
    published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Fill gaps in upstream articles so the dashboard never sees nulls.
fn normalize_articles(raw: Vec<Option<RawArticle>>, now: DateTime<Utc>) -> Vec<NewsArticle> {
    let fetched_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    raw.into_iter()
        .map(Option::unwrap_or_default)
        .map(|article| NewsArticle {
            title: article.title.unwrap_or_default(),
            description: article.description.unwrap_or_default(),
            url: article.url.unwrap_or_default(),
            source: ArticleSource {
                name: article
                    .source
                    .and_then(|source| source.name)
                    .unwrap_or_else(|| FALLBACK_SOURCE_NAME.to_string()),
            },
            published_at: article
                .published_at
                .unwrap_or_else(|| fetched_at.clone()),
        })
        .collect()
}
