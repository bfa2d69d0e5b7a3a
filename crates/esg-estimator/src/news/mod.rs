//! Sustainability headlines for the dashboard.
//!
//! The live feed sits behind a time-boxed cache; whenever it cannot deliver,
//! a curated static list is served instead so the panel is never empty.

mod cache;
pub mod domain;
mod fallback;
mod gnews;

pub use cache::{NewsCache, DEFAULT_CACHE_TTL};
pub use domain::{ArticleSource, FeedSource, NewsArticle, NewsFeed};
pub use fallback::fallback_articles;
pub use gnews::{GNewsClient, NewsQuery, DEFAULT_GNEWS_BASE_URL};

use std::future::Future;

use chrono::Utc;
use tracing::warn;

/// Upstream source of headlines.
pub trait NewsGateway: Send + Sync {
    fn fetch_articles(&self) -> impl Future<Output = Result<Vec<NewsArticle>, NewsError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NewsError {
    #[error("news request failed: {0}")]
    Transport(String),
    #[error("news API responded with status {0}")]
    Status(u16),
    #[error("news API response could not be decoded: {0}")]
    Decode(String),
    #[error("news API response missing articles array")]
    MissingArticles,
    #[error("invalid news endpoint: {0}")]
    InvalidUrl(String),
}

/// Dashboard-facing feed. Never fails: errors and empty results degrade to
/// the static headlines.
#[derive(Debug)]
pub struct NewsService<G> {
    cache: Option<NewsCache<G>>,
}

impl<G> NewsService<G>
where
    G: NewsGateway,
{
    pub fn live(cache: NewsCache<G>) -> Self {
        Self { cache: Some(cache) }
    }

    /// Static headlines only, used when no API key is configured.
    pub fn offline() -> Self {
        Self { cache: None }
    }

    pub fn is_live(&self) -> bool {
        self.cache.is_some()
    }

    pub async fn feed(&self) -> NewsFeed {
        let Some(cache) = &self.cache else {
            return Self::fallback();
        };

        match cache.articles().await {
            Ok(articles) if !articles.is_empty() => NewsFeed {
                articles: articles.as_ref().clone(),
                source: FeedSource::Live,
            },
            Ok(_) => {
                warn!("news API returned no articles, serving fallback headlines");
                Self::fallback()
            }
            Err(err) => {
                warn!(error = %err, "news API unavailable, serving fallback headlines");
                Self::fallback()
            }
        }
    }

    fn fallback() -> NewsFeed {
        NewsFeed {
            articles: fallback_articles(Utc::now()),
            source: FeedSource::Fallback,
        }
    }
}
