use esg_estimator::news::{FeedSource, NewsFeed};
use esg_estimator::onboarding::CompletedOnboarding;
use esg_estimator::portfolio::PortfolioSummary;
use esg_estimator::scoring::{BaselineRow, BenchmarkComparison};
use serde::Serialize;
use std::io::{self, Write};

pub(crate) fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)
}

pub(crate) fn render_estimate(completed: &CompletedOnboarding) {
    let CompletedOnboarding { data, report } = completed;
    let result = &report.result;

    println!("ESG estimate for {}", data.company_name);
    println!("- {} | {} | {}", data.industry, data.size, data.location);
    println!("- Score {} / 100 ({})", result.score, report.band.label());
    println!(
        "  Energy {} | Waste {} | Materials {}",
        result.energy_score, result.waste_score, result.material_score
    );
    println!("- Estimated tax offset: ${:.2}", result.estimated_tax_offset);
    if let Some(incentive) = &report.incentive {
        println!(
            "  {} ({:.1}% of annual revenue)",
            incentive.label(),
            incentive.rate * 100.0
        );
    }

    render_benchmark(&report.benchmark);

    println!("Recommendations:");
    for recommendation in &result.recommendations {
        println!("  - {recommendation}");
    }
}

pub(crate) fn render_benchmark(benchmark: &BenchmarkComparison) {
    println!("Benchmark vs {} average:", benchmark.industry);
    for pair in &benchmark.pairs {
        println!(
            "  - {}: yours {:.0} | industry {:.0}",
            pair.metric.label(),
            pair.yours,
            pair.industry
        );
    }
}

pub(crate) fn render_baselines(rows: &[BaselineRow]) {
    println!("Industry baselines (monthly)");
    for row in rows {
        println!(
            "- {}: {:.0} kWh | {:.0} kg waste",
            row.industry, row.baseline.monthly_kwh, row.baseline.waste_kg
        );
    }
}

pub(crate) fn render_portfolio(summary: &PortfolioSummary) {
    println!("Portfolio ({} companies)", summary.entries.len());
    for entry in &summary.entries {
        println!(
            "- {}: score {} | offset ${:.2}",
            entry.company_name, entry.result.score, entry.result.estimated_tax_offset
        );
    }

    match summary.average_score {
        Some(average) => println!("Average score: {average:.1}"),
        None => println!("Average score: n/a"),
    }
    println!("Total estimated offset: ${:.2}", summary.total_estimated_offset);
}

pub(crate) fn render_news(feed: &NewsFeed) {
    let source = match feed.source {
        FeedSource::Live => "live",
        FeedSource::Fallback => "curated fallback",
    };
    println!("Sustainability headlines ({source})");
    for article in &feed.articles {
        println!("- {} [{}]", article.title, article.source.name);
        if !article.description.is_empty() {
            println!("  {}", article.description);
        }
        println!("  {}", article.url);
    }
}

/// Writes streamed narrative updates to stdout as they arrive.
#[derive(Debug, Default)]
pub(crate) struct NarrativePrinter {
    shown: String,
}

impl NarrativePrinter {
    /// `text` is the full narrative so far; only the unseen suffix is
    /// printed. Text that does not extend what was shown starts a new block.
    pub(crate) fn update(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = match self.unseen(text) {
            Some(suffix) => write!(stdout, "{suffix}"),
            None => write!(stdout, "\n{text}"),
        };
        let _ = stdout.flush();

        self.shown.clear();
        self.shown.push_str(text);
    }

    fn unseen<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.strip_prefix(self.shown.as_str())
    }

    pub(crate) fn finish(self) {
        if !self.shown.is_empty() {
            println!();
        }
    }
}
