use chrono::{DateTime, SecondsFormat, Utc};

use super::domain::{ArticleSource, NewsArticle};

/// Curated headlines served whenever the live feed is unavailable.
pub fn fallback_articles(now: DateTime<Utc>) -> Vec<NewsArticle> {
    let published_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let article = |title: &str, description: &str, url: &str, source: &str| NewsArticle {
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        source: ArticleSource {
            name: source.to_string(),
        },
        published_at: published_at.clone(),
    };

    vec![
        article(
            "EU 2026 ESG Reporting Standards Finalized for SMEs",
            "New regulations set to take effect in January 2026 aim to simplify carbon reporting for small and medium enterprises across the Eurozone.",
            "https://ec.europa.eu/commission/index_en",
            "ESG Global News",
        ),
        article(
            "New Tax Credits for Electric Fleet Transition Announced",
            "Federal incentives for commercial EV adoption have been expanded, offering up to 30% offset for companies transitioning by Q4 2026.",
            "https://www.reuters.com/business/sustainable-business/",
            "Business Insider",
        ),
        article(
            "Circular Economy Initiatives Drive 15% ROI for Industrial Firms",
            "A recent study shows that waste reduction and material reuse programs are delivering significant bottom-line growth ahead of regulation deadlines.",
            "https://www.bloomberg.com/sustainability",
            "Sustainability Review",
        ),
    ]
}
