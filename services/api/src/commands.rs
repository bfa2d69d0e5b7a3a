use crate::infra::{
    build_engine, build_narrative_service, build_news_service, parse_fleet, parse_industry,
    parse_location, parse_size,
};
use crate::report::{
    print_json, render_baselines, render_estimate, render_news, render_portfolio,
    NarrativePrinter,
};
use clap::Args;
use esg_estimator::config::AppConfig;
use esg_estimator::error::AppError;
use esg_estimator::onboarding::{
    CompletedOnboarding, OnboardingField, OnboardingWizard, WizardError,
};
use esg_estimator::portfolio::PortfolioImporter;
use esg_estimator::scoring::{
    BusinessSize, FleetType, Industry, Location, OnboardingData, ScoringEngine,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct EstimateArgs {
    /// Company name shown on the report
    #[arg(long)]
    pub(crate) company: String,
    /// Industry (Manufacturing, Technology, Retail, Logistics, Construction)
    #[arg(long, value_parser = parse_industry)]
    pub(crate) industry: Option<Industry>,
    /// Headcount band (1-10, 11-250, 250+)
    #[arg(long, value_parser = parse_size)]
    pub(crate) size: Option<BusinessSize>,
    /// Reporting region (European Union, United States, Global/Other)
    #[arg(long, value_parser = parse_location)]
    pub(crate) location: Option<Location>,
    /// Monthly electricity consumption in kWh
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) monthly_kwh: Option<f64>,
    /// Monthly waste in kg
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) waste_kg: Option<f64>,
    /// Fleet composition (100% Electric, Hybrid Mix, Internal Combustion (Gas/Diesel))
    #[arg(long, value_parser = parse_fleet)]
    pub(crate) fleet: Option<FleetType>,
    /// Share of sustainably sourced materials, 0-100
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) materials: Option<f64>,
    /// Annual revenue in USD
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) revenue: Option<f64>,
    /// Corporate tax bracket in percent
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) tax_bracket: Option<f64>,
    /// Stream an AI-written audit after the score
    #[arg(long)]
    pub(crate) audit: bool,
    /// Print JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PortfolioArgs {
    /// CSV export with one company per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct BenchmarkArgs {
    /// Only show this industry
    #[arg(long, value_parser = parse_industry)]
    pub(crate) industry: Option<Industry>,
    /// Print JSON instead of the table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct NewsArgs {
    /// Print JSON instead of the headline list
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct EstimateOutput<'a> {
    #[serde(flatten)]
    onboarding: &'a CompletedOnboarding,
    #[serde(skip_serializing_if = "Option::is_none")]
    narrative: Option<String>,
}

/// Walks the three onboarding steps in order, as the form would.
pub(crate) fn complete_onboarding(
    engine: Arc<ScoringEngine>,
    args: &EstimateArgs,
) -> Result<CompletedOnboarding, WizardError> {
    let defaults = OnboardingData::default();
    let mut wizard = OnboardingWizard::new(engine);

    wizard.update(OnboardingField::CompanyName(args.company.clone()));
    wizard.update(OnboardingField::Industry(
        args.industry.unwrap_or(defaults.industry),
    ));
    wizard.update(OnboardingField::Size(args.size.unwrap_or(defaults.size)));
    wizard.update(OnboardingField::Location(
        args.location.unwrap_or(defaults.location),
    ));
    wizard.next()?;

    wizard.update(OnboardingField::MonthlyKwh(
        args.monthly_kwh.unwrap_or(defaults.monthly_kwh),
    ));
    wizard.update(OnboardingField::WasteVolume(
        args.waste_kg.unwrap_or(defaults.waste_volume),
    ));
    wizard.update(OnboardingField::FleetType(
        args.fleet.unwrap_or(defaults.fleet_type),
    ));
    wizard.update(OnboardingField::SustainableMaterials(
        args.materials.unwrap_or(defaults.sustainable_materials),
    ));
    wizard.next()?;

    wizard.update(OnboardingField::AnnualRevenue(
        args.revenue.unwrap_or(defaults.annual_revenue),
    ));
    wizard.update(OnboardingField::TaxBracket(
        args.tax_bracket.unwrap_or(defaults.tax_bracket),
    ));
    wizard.finish()
}

pub(crate) async fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let completed = complete_onboarding(build_engine(&config), &args)?;

    if args.json {
        let narrative = if args.audit {
            let service = build_narrative_service(&config.narrative);
            Some(service.audit(&completed.data).await)
        } else {
            None
        };
        print_json(&EstimateOutput {
            onboarding: &completed,
            narrative,
        })?;
        return Ok(());
    }

    render_estimate(&completed);

    if args.audit {
        let service = build_narrative_service(&config.narrative);
        println!("\nAI sustainability audit");
        let mut printer = NarrativePrinter::default();
        service
            .stream_audit(&completed.data, |text: &str| printer.update(text))
            .await;
        printer.finish();
    }

    Ok(())
}

pub(crate) fn run_portfolio(args: PortfolioArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config);
    let summary = PortfolioImporter::from_path(&args.csv, &engine)?;

    if args.json {
        print_json(&summary)?;
    } else {
        render_portfolio(&summary);
    }
    Ok(())
}

pub(crate) fn run_benchmark(args: BenchmarkArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config);

    let mut rows = engine.baselines().rows();
    if let Some(industry) = args.industry {
        rows.retain(|row| row.industry == industry);
    }

    if args.json {
        print_json(&rows)?;
    } else {
        render_baselines(&rows);
    }
    Ok(())
}

pub(crate) async fn run_news(args: NewsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let feed = build_news_service(&config.news).feed().await;

    if args.json {
        print_json(&feed)?;
    } else {
        render_news(&feed);
    }
    Ok(())
}
