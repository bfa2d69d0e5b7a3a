use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::domain::NewsArticle;
use super::{NewsError, NewsGateway};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Time-boxed cache with single-flight refresh in front of a [`NewsGateway`].
///
/// Callers that arrive while a refresh is running wait for it and share its
/// outcome, including a failure. Failures are never cached: the next caller
/// after a failed refresh triggers a new one.
#[derive(Debug)]
pub struct NewsCache<G> {
    gateway: G,
    ttl: Duration,
    state: Mutex<CacheState>,
    refreshes: AtomicU64,
}

#[derive(Debug, Default)]
struct CacheState {
    articles: Option<Arc<Vec<NewsArticle>>>,
    expires_at: Option<Instant>,
    last_failure: Option<NewsError>,
}

impl CacheState {
    fn fresh(&self, now: Instant) -> Option<Arc<Vec<NewsArticle>>> {
        match (&self.articles, self.expires_at) {
            (Some(articles), Some(expires_at)) if now < expires_at => Some(Arc::clone(articles)),
            _ => None,
        }
    }
}

impl<G> NewsCache<G>
where
    G: NewsGateway,
{
    pub fn new(gateway: G, ttl: Duration) -> Self {
        Self {
            gateway,
            ttl,
            state: Mutex::new(CacheState::default()),
            refreshes: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn articles(&self) -> Result<Arc<Vec<NewsArticle>>, NewsError> {
        let observed = self.refreshes.load(Ordering::Acquire);
        let mut state = self.state.lock().await;

        if let Some(articles) = state.fresh(Instant::now()) {
            return Ok(articles);
        }

        // A refresh finished while this caller was queued on the lock.
        if self.refreshes.load(Ordering::Acquire) != observed {
            if let Some(err) = &state.last_failure {
                return Err(err.clone());
            }
        }

        debug!("news cache stale, refreshing");
        let outcome = self.gateway.fetch_articles().await;
        self.refreshes.fetch_add(1, Ordering::AcqRel);

        match outcome {
            Ok(articles) => {
                let articles = Arc::new(articles);
                state.articles = Some(Arc::clone(&articles));
                state.expires_at = Some(Instant::now() + self.ttl);
                state.last_failure = None;
                Ok(articles)
            }
            Err(err) => {
                warn!(error = %err, "news refresh failed");
                state.last_failure = Some(err.clone());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::domain::ArticleSource;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex as StdMutex;

    struct ScriptedGateway {
        calls: AtomicUsize,
        outcomes: StdMutex<Vec<Result<Vec<NewsArticle>, NewsError>>>,
        latency: Duration,
    }

    impl ScriptedGateway {
        fn new(outcomes: Vec<Result<Vec<NewsArticle>, NewsError>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcomes: StdMutex::new(outcomes),
                latency: Duration::from_millis(50),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl NewsGateway for ScriptedGateway {
        async fn fetch_articles(&self) -> Result<Vec<NewsArticle>, NewsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.latency).await;
            let mut outcomes = self.outcomes.lock().expect("outcomes mutex");
            if outcomes.is_empty() {
                Err(NewsError::Status(503))
            } else {
                outcomes.remove(0)
            }
        }
    }

    fn headline(title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: String::new(),
            url: "https://news.example".to_string(),
            source: ArticleSource {
                name: "Wire".to_string(),
            },
            published_at: "2026-03-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn serves_cached_articles_until_ttl_expires() {
        let gateway = ScriptedGateway::new(vec![
            Ok(vec![headline("first")]),
            Ok(vec![headline("second")]),
        ]);
        let cache = NewsCache::new(gateway, Duration::from_secs(600));

        let first = cache.articles().await.expect("first fetch");
        let again = cache.articles().await.expect("cached");
        assert_eq!(first[0].title, "first");
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(cache.gateway.calls(), 1);

        tokio::time::advance(Duration::from_secs(601)).await;

        let refreshed = cache.articles().await.expect("refetch");
        assert_eq!(refreshed[0].title, "second");
        assert_eq!(cache.gateway.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_refresh() {
        let gateway = ScriptedGateway::new(vec![Ok(vec![headline("shared")])]);
        let cache = NewsCache::new(gateway, DEFAULT_CACHE_TTL);

        let (a, b, c) = tokio::join!(cache.articles(), cache.articles(), cache.articles());

        assert_eq!(cache.gateway.calls(), 1);
        for outcome in [a, b, c] {
            assert_eq!(outcome.expect("shared result")[0].title, "shared");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_a_failure_but_it_is_not_cached() {
        let gateway = ScriptedGateway::new(vec![
            Err(NewsError::Status(500)),
            Ok(vec![headline("recovered")]),
        ]);
        let cache = NewsCache::new(gateway, DEFAULT_CACHE_TTL);

        let (a, b) = tokio::join!(cache.articles(), cache.articles());
        assert_eq!(a.expect_err("upstream failed"), NewsError::Status(500));
        assert_eq!(b.expect_err("shared failure"), NewsError::Status(500));
        assert_eq!(cache.gateway.calls(), 1);

        let recovered = cache.articles().await.expect("retried");
        assert_eq!(recovered[0].title, "recovered");
        assert_eq!(cache.gateway.calls(), 2);
    }
}
