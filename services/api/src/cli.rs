use crate::commands::{
    run_benchmark, run_estimate, run_news, run_portfolio, BenchmarkArgs, EstimateArgs, NewsArgs,
    PortfolioArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use esg_estimator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ESG Compliance Estimator",
    about = "Score company sustainability data and serve the estimator API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one company through the onboarding flow
    Estimate(EstimateArgs),
    /// Score every company in a CSV export
    Portfolio(PortfolioArgs),
    /// Print the industry baselines used for scoring
    Benchmark(BenchmarkArgs),
    /// Print the current sustainability headlines
    News(NewsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args).await,
        Command::Portfolio(args) => run_portfolio(args),
        Command::Benchmark(args) => run_benchmark(args),
        Command::News(args) => run_news(args).await,
    }
}
